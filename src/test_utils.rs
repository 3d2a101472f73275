//! Test utilities
//!
//! Proptest generators for device records and collections, plus an
//! in-memory transport that records requests and replays queued responses.

pub mod generators {
    use proptest::prelude::*;

    use crate::constants::{
        DEVICE_TYPE_ARLO_BRIDGE, DEVICE_TYPE_ARLO_Q, DEVICE_TYPE_BASESTATION, DEVICE_TYPE_CAMERA,
        DEVICE_TYPE_LIGHTS, DEVICE_TYPE_SIREN,
    };
    use crate::devices::Devices;
    use crate::domain::Device;

    /// Device id in the service's uppercase serial-number style
    pub fn device_id() -> impl Strategy<Value = String> {
        prop::string::string_regex("[0-9A-F]{4,13}").expect("Valid regex for device_id")
    }

    /// Device type, weighted towards the two classified types
    pub fn device_type() -> impl Strategy<Value = String> {
        prop_oneof![
            3 => Just(DEVICE_TYPE_CAMERA.to_string()),
            2 => Just(DEVICE_TYPE_BASESTATION.to_string()),
            1 => Just(DEVICE_TYPE_ARLO_Q.to_string()),
            1 => Just(DEVICE_TYPE_ARLO_BRIDGE.to_string()),
            1 => Just(DEVICE_TYPE_SIREN.to_string()),
            1 => Just(DEVICE_TYPE_LIGHTS.to_string()),
        ]
    }

    /// A single device; roughly a quarter are their own parent
    pub fn device() -> impl Strategy<Value = Device> {
        (device_id(), device_id(), device_type(), any::<bool>(), any::<bool>()).prop_map(
            |(device_id, other_parent, device_type, self_parent, coin)| {
                let parent_id = if self_parent && coin {
                    device_id.clone()
                } else {
                    other_parent
                };
                Device {
                    device_id,
                    parent_id,
                    device_type,
                    ..Default::default()
                }
            },
        )
    }

    /// A collection of devices, some of them parented to each other
    pub fn devices(size: std::ops::Range<usize>) -> impl Strategy<Value = Devices> {
        prop::collection::vec((device(), any::<prop::sample::Index>()), size).prop_map(
            |pairs| {
                let ids: Vec<String> = pairs.iter().map(|(d, _)| d.device_id.clone()).collect();
                pairs
                    .into_iter()
                    .map(|(mut d, index)| {
                        // Re-point non-root devices at a sibling so parent
                        // lookups have something to find.
                        if d.device_id != d.parent_id && !ids.is_empty() {
                            d.parent_id = ids[index.index(ids.len())].clone();
                        }
                        d
                    })
                    .collect()
            },
        )
    }
}

pub mod helpers {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use crate::domain::Device;
    use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};

    /// Minimal device with the fields classification looks at
    pub fn device(device_id: &str, parent_id: &str, device_type: &str) -> Device {
        Device {
            device_id: device_id.to_string(),
            parent_id: parent_id.to_string(),
            device_type: device_type.to_string(),
            ..Default::default()
        }
    }

    /// Transport that records every request and replays queued outcomes
    ///
    /// Clones share state, so a test can keep one handle while the client
    /// owns another. An empty queue answers with a transport error.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingTransport {
        requests: Arc<Mutex<Vec<HttpRequest>>>,
        outcomes: Arc<Mutex<VecDeque<Result<HttpResponse, String>>>>,
    }

    impl RecordingTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a response with the given status and body
        pub fn respond(&self, status: u16, body: &str) {
            let reason = reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or_default();
            self.outcomes
                .lock()
                .unwrap()
                .push_back(Ok(HttpResponse::new(status, reason, body)));
        }

        /// Queue a transport failure
        pub fn fail(&self, message: &str) {
            self.outcomes
                .lock()
                .unwrap()
                .push_back(Err(message.to_string()));
        }

        /// Requests sent so far, oldest first
        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for RecordingTransport {
        fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            match self.outcomes.lock().unwrap().pop_front() {
                Some(Ok(response)) => Ok(response),
                Some(Err(message)) => Err(TransportError::Other(message)),
                None => Err(TransportError::Other("no response queued".to_string())),
            }
        }
    }
}
