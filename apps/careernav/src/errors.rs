use serde_json::{json, Value};
use thiserror::Error;

/// Core error type.
/// Every variant converts into an `{code, message}` payload so it can travel
/// inside a failure `Envelope` instead of being raised to the View Layer.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidCredentials(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("No mock for {path}")]
    Unsupported { path: String },

    #[error("Malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// A failure envelope surfaced through the typed session API.
    #[error("Request failed: {0}")]
    Api(Value),
}

impl CoreError {
    /// True for failures that mean "the backend is absent" rather than "the backend said no".
    pub fn is_transport(&self) -> bool {
        matches!(self, CoreError::Transport(_))
    }

    /// Converts the error into the payload carried by a failure envelope.
    pub fn to_payload(&self) -> Value {
        let (code, message) = match self {
            CoreError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            CoreError::InvalidCredentials(msg) => ("INVALID_CREDENTIALS", msg.clone()),
            CoreError::Unauthorized => ("UNAUTHORIZED", self.to_string()),
            CoreError::Transport(e) => {
                tracing::error!("Transport error escaped the gateway: {e}");
                ("TRANSPORT_ERROR", "The service is unreachable".to_string())
            }
            CoreError::Unsupported { .. } => ("UNSUPPORTED", self.to_string()),
            CoreError::Decode(_) => ("DECODE_ERROR", self.to_string()),
            // Already a payload; pass it through untouched.
            CoreError::Api(payload) => return payload.clone(),
        };

        json!({
            "code": code,
            "message": message
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_payload_carries_message() {
        let payload = CoreError::Validation("Fill all fields".to_string()).to_payload();
        assert_eq!(payload["code"], "VALIDATION_ERROR");
        assert_eq!(payload["message"], "Fill all fields");
    }

    #[test]
    fn test_unsupported_message_names_path() {
        let err = CoreError::Unsupported {
            path: "/auth/logout/".to_string(),
        };
        assert_eq!(err.to_payload()["message"], "No mock for /auth/logout/");
    }

    #[test]
    fn test_api_payload_passes_through() {
        let payload = json!({ "detail": "nope" });
        assert_eq!(CoreError::Api(payload.clone()).to_payload(), payload);
    }

    #[test]
    fn test_only_transport_is_transport() {
        assert!(!CoreError::Unauthorized.is_transport());
        assert!(!CoreError::Validation("x".into()).is_transport());
    }
}
