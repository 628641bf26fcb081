//! Uniform `{ok, data|error}` result wrapper returned by every data-source call.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::errors::CoreError;

#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Success(Value),
    Failure(Value),
}

/// Wire shape of an envelope: `{"ok": true, "data": ...}` or `{"ok": false, "error": ...}`.
#[derive(Serialize, Deserialize)]
struct RawEnvelope {
    ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<Value>,
}

impl Envelope {
    /// Success envelope from any serializable payload.
    /// A payload that cannot be represented as JSON becomes a failure envelope.
    pub fn success<T: Serialize>(data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => Envelope::Success(value),
            Err(e) => Envelope::from(CoreError::Decode(e)),
        }
    }

    /// Failure envelope carrying `{"message": ...}`.
    pub fn failure_message(message: impl Into<String>) -> Self {
        Envelope::Failure(serde_json::json!({ "message": message.into() }))
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            Envelope::Success(v) => Some(v),
            Envelope::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&Value> {
        match self {
            Envelope::Success(_) => None,
            Envelope::Failure(v) => Some(v),
        }
    }

    /// Human-readable error text: `error.message` when present, otherwise the
    /// error rendered as JSON (a raw-text error renders as itself).
    pub fn error_message(&self) -> Option<String> {
        let error = self.error()?;
        Some(match error {
            Value::String(text) => text.clone(),
            Value::Object(map) => match map.get("message") {
                Some(Value::String(msg)) => msg.clone(),
                _ => error.to_string(),
            },
            other => other.to_string(),
        })
    }

    /// Converts into a typed result, decoding the success payload as `T`.
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T, CoreError> {
        match self {
            Envelope::Success(value) => Ok(serde_json::from_value(value)?),
            Envelope::Failure(error) => Err(CoreError::Api(error)),
        }
    }
}

impl From<CoreError> for Envelope {
    fn from(err: CoreError) -> Self {
        Envelope::Failure(err.to_payload())
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = match self {
            Envelope::Success(v) => RawEnvelope {
                ok: true,
                data: Some(v.clone()),
                error: None,
            },
            Envelope::Failure(v) => RawEnvelope {
                ok: false,
                data: None,
                error: Some(v.clone()),
            },
        };
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Envelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEnvelope::deserialize(deserializer)?;
        Ok(if raw.ok {
            Envelope::Success(raw.data.unwrap_or(Value::Null))
        } else {
            Envelope::Failure(raw.error.unwrap_or(Value::Null))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_serializes_with_data() {
        let env = Envelope::Success(json!({ "token": "t" }));
        let wire = serde_json::to_value(&env).unwrap();
        assert_eq!(wire, json!({ "ok": true, "data": { "token": "t" } }));
    }

    #[test]
    fn test_failure_serializes_with_error() {
        let env = Envelope::failure_message("nope");
        let wire = serde_json::to_value(&env).unwrap();
        assert_eq!(wire, json!({ "ok": false, "error": { "message": "nope" } }));
    }

    #[test]
    fn test_null_success_payload_survives_wire() {
        let env: Envelope = serde_json::from_value(json!({ "ok": true, "data": null })).unwrap();
        assert_eq!(env, Envelope::Success(Value::Null));
    }

    #[test]
    fn test_error_message_prefers_message_field() {
        let env = Envelope::failure_message("Invalid credentials (mock)");
        assert_eq!(env.error_message().unwrap(), "Invalid credentials (mock)");
    }

    #[test]
    fn test_error_message_falls_back_to_json_text() {
        let env = Envelope::Failure(json!({ "detail": "bad" }));
        assert_eq!(env.error_message().unwrap(), r#"{"detail":"bad"}"#);
    }

    #[test]
    fn test_error_message_raw_text() {
        let env = Envelope::Failure(Value::String("Bad Gateway".into()));
        assert_eq!(env.error_message().unwrap(), "Bad Gateway");
        assert!(Envelope::Success(Value::Null).error_message().is_none());
    }

    #[test]
    fn test_into_result_failure_is_api_error() {
        let err = Envelope::failure_message("x")
            .into_result::<Value>()
            .unwrap_err();
        assert!(matches!(err, CoreError::Api(_)));
    }
}
