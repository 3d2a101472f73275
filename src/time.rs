use chrono::{DateTime, Utc};

/// Clock trait for abstracting time operations
pub trait Clock: Send + Sync {
    /// Milliseconds since Unix epoch (1970-01-01 00:00:00 UTC)
    fn now_epoch_millis(&self) -> i64;
}

/// Production implementation of Clock using system time
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_epoch_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Test implementation of Clock with fixed/controllable time
#[derive(Debug, Clone)]
pub struct FixedClock {
    timestamp: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self { timestamp }
    }

    /// Create a FixedClock from RFC3339 string
    pub fn from_rfc3339(timestamp_str: &str) -> Result<Self, chrono::ParseError> {
        let timestamp = DateTime::parse_from_rfc3339(timestamp_str)?.with_timezone(&Utc);
        Ok(Self { timestamp })
    }

    /// Create a FixedClock from epoch milliseconds, `None` when out of range
    pub fn from_epoch_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self::new)
    }

    pub fn advance_millis(&mut self, millis: i64) {
        self.timestamp += chrono::Duration::milliseconds(millis);
    }
}

impl Clock for FixedClock {
    fn now_epoch_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}
