//! Wire types for the scoring service API.

use serde::Deserialize;

/// Response from `POST /token`.
#[derive(Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Response from `POST /upload_criteria`.
///
/// The service may return additional fields alongside the request id; only
/// the id is needed to correlate later status and result calls.
#[derive(Deserialize, Debug, Clone)]
pub struct SubmitReceipt {
    pub request_id: String,
}

/// Response from `GET /get_status/{request_id}`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub status: RequestStatus,
    #[serde(default)]
    pub message: String,
}

/// Processing state of a submitted request.
///
/// The service reports status as a free-form string. `completed` is the only
/// success state; `error` and `hold` are terminal failures. Anything else
/// (`pending`, `processing`, or a string this client does not know about) is
/// treated as still in progress and polled again.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String")]
pub enum RequestStatus {
    Pending,
    Processing,
    Completed,
    Error,
    Hold,
    Other(String),
}

impl RequestStatus {
    /// True if no further polling is meaningful.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestStatus::Completed | RequestStatus::Error | RequestStatus::Hold
        )
    }

    /// True for the terminal failure states (`error`, `hold`).
    pub fn is_failure(&self) -> bool {
        matches!(self, RequestStatus::Error | RequestStatus::Hold)
    }
}

impl From<String> for RequestStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => RequestStatus::Pending,
            "processing" => RequestStatus::Processing,
            "completed" => RequestStatus::Completed,
            "error" => RequestStatus::Error,
            "hold" => RequestStatus::Hold,
            _ => RequestStatus::Other(value),
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Processing => write!(f, "processing"),
            RequestStatus::Completed => write!(f, "completed"),
            RequestStatus::Error => write!(f, "error"),
            RequestStatus::Hold => write!(f, "hold"),
            RequestStatus::Other(s) => write!(f, "{}", s),
        }
    }
}
