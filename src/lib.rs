//! Synchronous client for the Arlo cloud camera platform.
//!
//! Devices are plain records decoded from the service. [`Devices`] answers
//! lookup and classification queries in memory; mutations go through an
//! [`ArloClient`], which scopes each call to the device's cloud partition
//! and folds the outcome into a single [`ArloError`].

// Declare modules at the root level
pub mod config;
pub mod constants;
pub mod device_update;
pub mod devices;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod request;
pub mod time;
pub mod trans_id;
pub mod transport;

// Test utilities module (available in test and integration test builds)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export at root for convenience
pub use config::*;
pub use device_update::*;
pub use devices::*;
pub use domain::*;
pub use envelope::*;
pub use error::*;
pub use request::*;
pub use time::*;
pub use trans_id::*;
pub use transport::*;
