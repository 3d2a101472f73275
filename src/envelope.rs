use serde::{Deserialize, Serialize};

/// Status envelope carried by every API response
///
/// Wire shape: `{"success": bool, "reason": "..."}`. Decoded once into a
/// tagged value; a payload without `success` counts as a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEnvelope", into = "RawEnvelope")]
pub enum Envelope {
    Success,
    Failure { reason: String },
}

impl Envelope {
    /// True when the service reported `success: true`
    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success)
    }

    /// Server-supplied failure reason, if the call failed
    pub fn reason(&self) -> Option<&str> {
        match self {
            Envelope::Success => None,
            Envelope::Failure { reason } => Some(reason),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl From<RawEnvelope> for Envelope {
    fn from(raw: RawEnvelope) -> Self {
        if raw.success {
            Envelope::Success
        } else {
            Envelope::Failure {
                reason: raw.reason.unwrap_or_default(),
            }
        }
    }
}

impl From<Envelope> for RawEnvelope {
    fn from(envelope: Envelope) -> Self {
        match envelope {
            Envelope::Success => RawEnvelope {
                success: true,
                reason: None,
            },
            Envelope::Failure { reason } => RawEnvelope {
                success: false,
                reason: Some(reason),
            },
        }
    }
}
