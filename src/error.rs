use thiserror::Error;

use crate::transport::TransportError;

/// Error returned by every remote operation
///
/// Each variant that can carry one is annotated with the context message of
/// the operation that failed, e.g. "failed to update device name".
#[derive(Debug, Error)]
pub enum ArloError {
    /// The call never produced a response
    #[error("{context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: TransportError,
    },

    /// The body was not a status envelope
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    /// The service answered with a status other than 200
    #[error("{context}: http request failed: {status} {reason}")]
    Http {
        context: String,
        status: u16,
        reason: String,
    },

    /// The envelope reported `success: false`
    #[error("{context}: {reason}")]
    Api { context: String, reason: String },

    #[error("invalid device order: {0}")]
    InvalidDeviceOrder(String),
}

impl ArloError {
    /// Context message of the failed operation, when the error carries one
    pub fn context(&self) -> Option<&str> {
        match self {
            ArloError::Transport { context, .. }
            | ArloError::Http { context, .. }
            | ArloError::Api { context, .. } => Some(context),
            ArloError::Decode(_) | ArloError::InvalidDeviceOrder(_) => None,
        }
    }

    /// HTTP status for `Http` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ArloError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
