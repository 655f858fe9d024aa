//! Response envelopes used by the Shorty backend.
//!
//! Successful responses wrap their payload as `{"status": "success", "result": ...}`
//! and failures as `{"status": "error", "error": {"id": ..., "message": ...}}`.
//! Only `result` and `error.message` carry meaning for the client; every
//! field is optional here so that a missing one can be reported as a
//! malformed response instead of a decode failure.

use serde::{Deserialize, Serialize};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessEnvelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> SuccessEnvelope<T> {
    pub fn new(result: T) -> Self {
        Self {
            status: Some(STATUS_SUCCESS.to_string()),
            result: Some(result),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl ErrorEnvelope {
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: Some(STATUS_ERROR.to_string()),
            error: Some(ErrorBody {
                id: Some(id.into()),
                message: Some(message.into()),
            }),
        }
    }

    /// Returns the error message, if the envelope carries one.
    pub fn message(&self) -> Option<&str> {
        self.error.as_ref()?.message.as_deref()
    }

    pub fn error_id(&self) -> Option<&str> {
        self.error.as_ref()?.id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LinkRecord;

    #[test]
    fn decodes_success_envelope() {
        let json = r#"{"status":"success","result":{"id":"abc","url":"https://example.com"}}"#;
        let envelope: SuccessEnvelope<LinkRecord> = serde_json::from_str(json).unwrap();
        let link = envelope.result.unwrap();
        assert_eq!(link.id, "abc");
        assert_eq!(link.url, "https://example.com");
    }

    #[test]
    fn missing_result_decodes_as_none() {
        let envelope: SuccessEnvelope<LinkRecord> =
            serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert!(envelope.result.is_none());
    }

    #[test]
    fn error_envelope_message() {
        let json = r#"{"status":"error","error":{"id":"-","message":"link not found"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.message(), Some("link not found"));
        assert_eq!(envelope.error_id(), Some("-"));
    }

    #[test]
    fn error_envelope_without_message() {
        let envelope: ErrorEnvelope = serde_json::from_str(r#"{"error":{}}"#).unwrap();
        assert_eq!(envelope.message(), None);

        let envelope: ErrorEnvelope = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(envelope.message(), None);
    }

    #[test]
    fn constructed_error_envelope_serializes_like_backend() {
        let value = serde_json::to_value(ErrorEnvelope::new("WrongBody", "bad body")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "status": "error",
                "error": { "id": "WrongBody", "message": "bad body" }
            })
        );
    }
}
