// Service endpoints
pub const BASE_URL: &str = "https://my.arlo.com/hmsweb";
pub const DEVICE_RENAME_URI: &str = "/users/devices/renameDevice";
pub const DEVICE_DISPLAY_ORDER_URI: &str = "/users/devices/displayOrder";
pub const NOTIFY_URI: &str = "/users/devices/notify";

// -------------------------------------------------------------------------------------------------

// Tenant-scoping header. Header names are case-insensitive on the wire and
// `HeaderName` only accepts the lowercase spelling of `xcloudId`.
pub const XCLOUD_ID_HEADER: &str = "xcloudid";

// -------------------------------------------------------------------------------------------------

// Transaction ids
pub const TRANS_ID_PREFIX: &str = "web";

// -------------------------------------------------------------------------------------------------

// Device types as reported in `deviceType`
pub const DEVICE_TYPE_ARLO_BRIDGE: &str = "arlobridge";
pub const DEVICE_TYPE_ARLO_Q: &str = "arloq";
pub const DEVICE_TYPE_BASESTATION: &str = "basestation";
pub const DEVICE_TYPE_CAMERA: &str = "camera";
pub const DEVICE_TYPE_LIGHTS: &str = "lights";
pub const DEVICE_TYPE_SIREN: &str = "siren";
