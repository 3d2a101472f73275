//! Device collection queries
//!
//! A [`Devices`] list is classified into [`Basestations`] and [`Cameras`].
//! The two views deliberately overlap: hybrid devices such as the Arlo Q
//! have no separate basestation, so they must be driven both as a hub and
//! as a camera and therefore show up in both views.

use serde::{Deserialize, Serialize};
use std::ops::Deref;

use crate::constants::{DEVICE_TYPE_BASESTATION, DEVICE_TYPE_CAMERA};
use crate::domain::Device;

impl Device {
    /// A device is a basestation when it says so, or when it is its own parent
    ///
    /// The self-parent rule folds in hybrid devices that report a type of
    /// their own (e.g. `arloq`) but act as the root of their subtree.
    pub fn is_basestation(&self) -> bool {
        self.device_type == DEVICE_TYPE_BASESTATION || self.device_id == self.parent_id
    }

    /// A device is a camera only when its declared type is `camera`
    pub fn is_camera(&self) -> bool {
        self.device_type == DEVICE_TYPE_CAMERA
    }
}

/// Ordered list of devices as returned by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Devices(Vec<Device>);

impl Devices {
    /// Wrap a device list in service order
    pub fn new(devices: Vec<Device>) -> Self {
        Self(devices)
    }

    /// First device with the given id, if any
    pub fn find(&self, device_id: &str) -> Option<&Device> {
        self.0.iter().find(|d| d.device_id == device_id)
    }

    /// All devices whose parent is `basestation_id`, viewed as cameras
    pub fn find_cameras(&self, basestation_id: &str) -> Cameras {
        self.0
            .iter()
            .filter(|d| d.parent_id == basestation_id)
            .cloned()
            .map(Camera::from)
            .collect()
    }

    /// Every device that is not strictly a camera
    pub fn get_basestations(&self) -> Basestations {
        self.0
            .iter()
            .filter(|d| d.is_basestation() || !d.is_camera())
            .cloned()
            .map(Basestation::from)
            .collect()
    }

    /// Every device that is not strictly a basestation
    pub fn get_cameras(&self) -> Cameras {
        self.0
            .iter()
            .filter(|d| d.is_camera() || !d.is_basestation())
            .cloned()
            .map(Camera::from)
            .collect()
    }

    /// Unwrap into the underlying list
    pub fn into_inner(self) -> Vec<Device> {
        self.0
    }
}

impl Deref for Devices {
    type Target = [Device];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Device>> for Devices {
    fn from(devices: Vec<Device>) -> Self {
        Self(devices)
    }
}

impl FromIterator<Device> for Devices {
    fn from_iter<I: IntoIterator<Item = Device>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Devices {
    type Item = Device;
    type IntoIter = std::vec::IntoIter<Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Devices {
    type Item = &'a Device;
    type IntoIter = std::slice::Iter<'a, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Generates a projection newtype over [`Device`] and its collection type
macro_rules! device_view {
    ($(#[$meta:meta])* $view:ident, $collection:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $view(Device);

        impl $view {
            /// Borrow the underlying device record
            pub fn device(&self) -> &Device {
                &self.0
            }

            pub fn into_device(self) -> Device {
                self.0
            }
        }

        impl From<Device> for $view {
            fn from(device: Device) -> Self {
                Self(device)
            }
        }

        impl Deref for $view {
            type Target = Device;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $collection(Vec<$view>);

        impl $collection {
            /// First member with the given id, if any
            pub fn find(&self, device_id: &str) -> Option<&$view> {
                self.0.iter().find(|d| d.device_id == device_id)
            }

            pub fn into_inner(self) -> Vec<$view> {
                self.0
            }
        }

        impl Deref for $collection {
            type Target = [$view];

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl FromIterator<$view> for $collection {
            fn from_iter<I: IntoIterator<Item = $view>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }

        impl IntoIterator for $collection {
            type Item = $view;
            type IntoIter = std::vec::IntoIter<$view>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $collection {
            type Item = &'a $view;
            type IntoIter = std::slice::Iter<'a, $view>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

device_view!(
    /// A device driven as a hub: notifications, modes, event stream
    Basestation,
    Basestations
);

device_view!(
    /// A device driven as a camera: snapshots, streams, recordings
    Camera,
    Cameras
);
