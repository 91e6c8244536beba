//! Failures reported by the scoring service.

use super::types::RequestStatus;

/// Errors surfaced by the service itself, as opposed to transport failures.
///
/// Every variant is fatal to the workflow: nothing here is retried.
#[derive(Debug)]
pub enum ServiceError {
    /// Credential exchange rejected (non-200 on the token endpoint).
    AuthenticationFailed(String),
    /// Criteria submission rejected (non-200 on the upload endpoint).
    SubmissionFailed(String),
    /// A status query returned a non-200 outcome.
    StatusQueryFailed(String),
    /// The service moved the request into a terminal failure state.
    TerminalStatus {
        status: RequestStatus,
        message: String,
    },
    /// Fetching the result document returned a non-200 outcome.
    ResponseFetchFailed(String),
    /// The result document itself encodes an application-level error.
    ResultError { error: String, message: String },
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::AuthenticationFailed(body) => {
                write!(f, "Authentication failed: {}", body)
            }
            ServiceError::SubmissionFailed(body) => {
                write!(f, "Criteria upload failed: {}", body)
            }
            ServiceError::StatusQueryFailed(body) => {
                write!(f, "Status check failed: {}", body)
            }
            ServiceError::TerminalStatus { status, message } => {
                write!(
                    f,
                    "Request cannot be processed (status: {}): {}. Please contact support.",
                    status, message
                )
            }
            ServiceError::ResponseFetchFailed(body) => {
                write!(f, "Getting response failed: {}", body)
            }
            ServiceError::ResultError { error, message } => {
                write!(f, "Service returned an error result: {}: {}", error, message)
            }
        }
    }
}

impl std::error::Error for ServiceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_body() {
        let err = ServiceError::AuthenticationFailed("HTTP 401: bad credentials".to_string());
        assert!(err.to_string().contains("bad credentials"));
    }

    #[test]
    fn test_terminal_status_display() {
        let err = ServiceError::TerminalStatus {
            status: RequestStatus::Hold,
            message: "manual review required".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("hold"));
        assert!(text.contains("manual review required"));
    }
}
