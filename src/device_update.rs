use serde::Serialize;
use tracing::info;

use crate::constants::{DEVICE_DISPLAY_ORDER_URI, DEVICE_RENAME_URI, NOTIFY_URI};
use crate::devices::Basestation;
use crate::domain::{Device, DeviceOrder};
use crate::error::ArloError;
use crate::request::{check_request, ArloClient};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenameRequest<'a> {
    device_id: &'a str,
    device_name: &'a str,
    parent_id: &'a str,
}

impl Device {
    /// Rename the device on the service
    ///
    /// The local record is left untouched; refresh the device list to see
    /// the new name.
    pub fn update_device_name(&self, client: &ArloClient, name: &str) -> Result<(), ArloError> {
        let body = RenameRequest {
            device_id: &self.device_id,
            device_name: name,
            parent_id: &self.parent_id,
        };

        let outcome = client.put(
            DEVICE_RENAME_URI,
            Some(self.x_cloud_id.as_str()),
            Some(&body),
            None,
        );
        check_request(outcome, "failed to update device name")?;

        info!(device_id = %self.device_id, "Device renamed");
        Ok(())
    }
}

impl ArloClient {
    /// Store the display order the apps use to list devices
    ///
    /// Ranks must be unique; a duplicate is rejected before any call is made.
    pub fn update_display_order(&self, order: &DeviceOrder) -> Result<(), ArloError> {
        if !order.has_unique_ranks() {
            return Err(ArloError::InvalidDeviceOrder(
                "two devices share a rank".to_string(),
            ));
        }

        let outcome = self.post(DEVICE_DISPLAY_ORDER_URI, None, Some(order), None);
        check_request(outcome, "failed to update display order")
    }
}

/// Message relayed by the service to a basestation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyRequest {
    pub action: String,
    pub resource: String,
    pub publish_response: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Value>,
}

impl NotifyRequest {
    pub fn new(action: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            resource: resource.into(),
            publish_response: true,
            properties: None,
        }
    }

    pub fn with_properties(mut self, properties: serde_json::Value) -> Self {
        self.properties = Some(properties);
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotifyPayload<'a> {
    #[serde(flatten)]
    request: &'a NotifyRequest,
    trans_id: String,
    from: String,
    to: &'a str,
}

impl Basestation {
    /// Send a notify message to the basestation, tagged with a fresh transaction id
    pub fn notify(&self, client: &ArloClient, request: &NotifyRequest) -> Result<(), ArloError> {
        let payload = NotifyPayload {
            request,
            trans_id: client.trans_id(),
            from: format!("{}_web", self.user_id),
            to: &self.device_id,
        };
        let path = format!("{}/{}", NOTIFY_URI, self.device_id);

        let outcome = client.post(
            &path,
            Some(self.x_cloud_id.as_str()),
            Some(&payload),
            None,
        );
        check_request(outcome, "failed to notify device")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::XCLOUD_ID_HEADER;
    use crate::test_utils::helpers::{device, RecordingTransport};
    use crate::time::FixedClock;
    use crate::trans_id::{is_valid_trans_id, RandomTransIdGenerator};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use reqwest::Method;

    fn camera() -> Device {
        let mut camera = device("C1", "B1", "camera");
        camera.device_name = "Old Name".to_string();
        camera.x_cloud_id = "1005-123-999".to_string();
        camera
    }

    #[test]
    fn test_update_device_name_single_put() {
        let transport = RecordingTransport::new();
        transport.respond(200, r#"{"success": true}"#);
        let client = ArloClient::new(transport.clone());

        let camera = camera();
        camera.update_device_name(&client, "Back Yard").unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::PUT);
        assert_eq!(requests[0].path, "/users/devices/renameDevice");
        assert_eq!(
            requests[0].headers.get(XCLOUD_ID_HEADER).unwrap(),
            "1005-123-999"
        );
        assert_eq!(
            requests[0].body,
            Some(serde_json::json!({
                "deviceId": "C1",
                "deviceName": "Back Yard",
                "parentId": "B1"
            }))
        );

        // Local state is not updated
        assert_eq!(camera.device_name, "Old Name");
    }

    #[test]
    fn test_update_device_name_http_failure() {
        let transport = RecordingTransport::new();
        transport.respond(500, r#"{"success": true}"#);
        transport.respond(200, r#"{"success": true}"#);
        let client = ArloClient::new(transport.clone());

        let error = camera().update_device_name(&client, "x").unwrap_err();

        assert_eq!(error.status(), Some(500));
        assert!(error.to_string().contains("failed to update device name"));
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn test_update_device_name_envelope_failure() {
        let transport = RecordingTransport::new();
        transport.respond(200, r#"{"success": false, "reason": "bad token"}"#);
        let client = ArloClient::new(transport.clone());

        let error = camera().update_device_name(&client, "x").unwrap_err();

        assert!(error.to_string().contains("bad token"));
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn test_update_device_name_transport_failure() {
        let transport = RecordingTransport::new();
        transport.fail("connection reset");
        let client = ArloClient::new(transport.clone());

        let error = camera().update_device_name(&client, "x").unwrap_err();

        assert!(matches!(error, ArloError::Transport { .. }));
        assert!(error.to_string().contains("failed to update device name"));
    }

    #[test]
    fn test_camera_view_can_rename() {
        let transport = RecordingTransport::new();
        transport.respond(200, r#"{"success": true}"#);
        let client = ArloClient::new(transport.clone());

        let view = crate::devices::Camera::from(camera());
        view.update_device_name(&client, "Porch").unwrap();

        assert_eq!(
            transport.requests()[0].body.as_ref().unwrap()["deviceName"],
            "Porch"
        );
    }

    #[test]
    fn test_update_display_order() {
        let transport = RecordingTransport::new();
        transport.respond(200, r#"{"success": true}"#);
        let client = ArloClient::new(transport.clone());

        let order = DeviceOrder::from_ids(["B1", "C1"]);
        client.update_display_order(&order).unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].path, "/users/devices/displayOrder");
        assert_eq!(
            requests[0].body,
            Some(serde_json::json!({"devices": {"B1": 1, "C1": 2}}))
        );
    }

    #[test]
    fn test_update_display_order_rejects_duplicate_ranks() {
        let transport = RecordingTransport::new();
        let client = ArloClient::new(transport.clone());

        let mut order = DeviceOrder::from_ids(["B1", "C1"]);
        order.set("C2", 2);

        let error = client.update_display_order(&order).unwrap_err();
        assert!(matches!(error, ArloError::InvalidDeviceOrder(_)));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_notify_payload() {
        let transport = RecordingTransport::new();
        transport.respond(200, r#"{"success": true}"#);
        let generator = RandomTransIdGenerator::new(
            StdRng::seed_from_u64(9),
            FixedClock::from_epoch_millis(1_705_316_400_000).unwrap(),
        );
        let client = ArloClient::new(transport.clone()).with_trans_id_generator(generator);

        let mut base = device("B1", "B1", "basestation");
        base.user_id = "USER-1".to_string();
        base.x_cloud_id = "cloud-b".to_string();
        let base = Basestation::from(base);

        let request = NotifyRequest::new("get", "modes")
            .with_properties(serde_json::json!({"active": "mode1"}));
        base.notify(&client, &request).unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.path, "/users/devices/notify/B1");
        assert_eq!(sent.headers.get(XCLOUD_ID_HEADER).unwrap(), "cloud-b");

        let body = sent.body.as_ref().unwrap();
        assert_eq!(body["action"], "get");
        assert_eq!(body["resource"], "modes");
        assert_eq!(body["publishResponse"], true);
        assert_eq!(body["properties"]["active"], "mode1");
        assert_eq!(body["from"], "USER-1_web");
        assert_eq!(body["to"], "B1");

        let trans_id = body["transId"].as_str().unwrap();
        assert!(is_valid_trans_id(trans_id));
        assert!(trans_id.ends_with("!1705316400000"));
    }

    #[test]
    fn test_notify_failure_reason() {
        let transport = RecordingTransport::new();
        transport.respond(200, r#"{"success": false, "reason": "device offline"}"#);
        let client = ArloClient::new(transport.clone());

        let base = Basestation::from(device("B1", "B1", "basestation"));
        let error = base
            .notify(&client, &NotifyRequest::new("get", "modes"))
            .unwrap_err();

        assert_eq!(error.to_string(), "failed to notify device: device offline");
    }
}
