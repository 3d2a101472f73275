use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Device record as returned by the device list endpoint
///
/// A device can be a camera, a basestation, or a hybrid (e.g. Arlo Q) that
/// plays both roles. Keys missing from the payload, or sent as `null`, decode
/// to zero values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    #[serde(deserialize_with = "null_as_default")]
    pub analytics_enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub arlo_mobile_plan: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub arlo_mobile_plan_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub arlo_mobile_plan_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub arlo_mobile_plan_threshold: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub connectivity: Connectivity,
    #[serde(deserialize_with = "null_as_default")]
    pub critical_battery_state: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub date_created: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub device_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub device_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub device_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_order: u8,
    #[serde(deserialize_with = "null_as_default")]
    pub firmware_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub interface_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub interface_schema_ver: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_image_uploaded: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_modified: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub migrate_activity_zone: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub mobile_carrier: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mobile_trial_used: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub permissions_file_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub permissions_schema_ver: String,
    /// Misspelled key sent by the service alongside `permissionsVersion`.
    /// Kept as-is for wire compatibility.
    #[serde(deserialize_with = "null_as_default")]
    pub permissions_verison: String,
    #[serde(deserialize_with = "null_as_default")]
    pub permissions_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub presigned_full_frame_snapshot_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub presigned_last_image_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub presigned_snapshot_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub media_object_count: u8,
    #[serde(deserialize_with = "null_as_default")]
    pub model_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub owner: Owner,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub properties: Properties,
    #[serde(deserialize_with = "null_as_default")]
    pub unique_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user_role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    /// Cloud partition that owns the device; sent as the tenant-scoping header
    #[serde(deserialize_with = "null_as_default")]
    pub x_cloud_id: String,
}

/// Network details, mostly populated for LTE devices
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Connectivity {
    #[serde(deserialize_with = "null_as_default")]
    pub active_network: String,
    #[serde(deserialize_with = "null_as_default")]
    pub apn: String,
    #[serde(deserialize_with = "null_as_default")]
    pub carrier_fw: String,
    #[serde(deserialize_with = "null_as_default")]
    pub connected: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub fw_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub iccid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub imei: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mep_status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub msisdn: String,
    #[serde(deserialize_with = "null_as_default")]
    pub network_mode: String,
    #[serde(deserialize_with = "null_as_default")]
    pub network_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rf_band: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub roaming: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub roaming_allowed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub signal_strength: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub connection_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wwan_ip_addr: String,
}

/// Account that owns a device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Owner {
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub owner_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Properties {
    #[serde(deserialize_with = "null_as_default")]
    pub model_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub olson_time_zone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hw_version: String,
}

/// Decode a field, mapping JSON `null` to the type's default value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Display ordering of devices, keyed by device id
///
/// Wire shape: `{"devices": {"<deviceId>": <rank>, ...}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceOrder {
    pub devices: BTreeMap<String, i32>,
}

impl DeviceOrder {
    /// Create an empty ordering
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank the given device ids 1, 2, 3, ... in iteration order
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let devices = ids
            .into_iter()
            .zip(1..)
            .map(|(id, rank)| (id.into(), rank))
            .collect();
        Self { devices }
    }

    /// Set the rank of a device, replacing any previous rank
    pub fn set(&mut self, device_id: impl Into<String>, rank: i32) {
        self.devices.insert(device_id.into(), rank);
    }

    /// Rank assigned to a device, if any
    pub fn rank(&self, device_id: &str) -> Option<i32> {
        self.devices.get(device_id).copied()
    }

    /// True when no two devices share a rank
    pub fn has_unique_ranks(&self) -> bool {
        let mut seen = std::collections::BTreeSet::new();
        self.devices.values().all(|rank| seen.insert(*rank))
    }
}
