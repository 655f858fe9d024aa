use reqwest::StatusCode;
use shorty_core::{ApiError, ApiRecord, ErrorEnvelope, Result, SuccessEnvelope};
use tracing::warn;

/// Outcome class of a backend response.
///
/// Every operation classifies the status exactly once through
/// [`ResponseClass::of`]. `404` is checked before the generic success and
/// failure ranges, since it also belongs to the failure range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    Success,
    NotFound,
    Failure,
}

impl ResponseClass {
    pub fn of(status: StatusCode) -> Self {
        if status == StatusCode::NOT_FOUND {
            ResponseClass::NotFound
        } else if status.is_success() {
            ResponseClass::Success
        } else {
            ResponseClass::Failure
        }
    }
}

/// A fully buffered backend response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn class(&self) -> ResponseClass {
        ResponseClass::of(self.status)
    }

    /// Maps the response for operations with a not-found outcome.
    pub fn into_optional<T: ApiRecord>(self) -> Result<Option<T>> {
        match self.class() {
            ResponseClass::NotFound => Ok(None),
            ResponseClass::Success => self.into_record().map(Some),
            ResponseClass::Failure => Err(self.into_error()),
        }
    }

    /// Maps the response for operations where not-found is a failure like any other.
    pub fn into_required<T: ApiRecord>(self) -> Result<T> {
        match self.class() {
            ResponseClass::Success => self.into_record(),
            ResponseClass::NotFound | ResponseClass::Failure => Err(self.into_error()),
        }
    }

    /// Decodes the `result` field of a success envelope.
    pub fn into_record<T: ApiRecord>(self) -> Result<T> {
        let envelope: SuccessEnvelope<T> = serde_json::from_slice(&self.body)
            .map_err(|e| self.malformed(format!("invalid success body: {e}")))?;

        let record = envelope
            .result
            .ok_or_else(|| self.malformed("success body has no 'result' field".to_string()))?;

        record
            .check()
            .map_err(|reason| self.malformed(format!("invalid result: {reason}")))?;

        Ok(record)
    }

    /// Converts a non-success response into an error.
    ///
    /// A readable `error.message` becomes [`ApiError::Backend`]. A `404`
    /// without one falls back to the status reason, since routing layers in
    /// front of the backend answer it with arbitrary bodies. Anything else
    /// without a message is [`ApiError::MalformedResponse`].
    pub fn into_error(self) -> ApiError {
        let envelope = serde_json::from_slice::<ErrorEnvelope>(&self.body);

        match envelope {
            Ok(envelope) if envelope.message().is_some() => ApiError::Backend {
                status: self.status.as_u16(),
                id: envelope.error_id().map(str::to_string),
                message: envelope.message().unwrap_or_default().to_string(),
            },
            _ if self.status == StatusCode::NOT_FOUND => ApiError::Backend {
                status: self.status.as_u16(),
                id: None,
                message: self
                    .status
                    .canonical_reason()
                    .unwrap_or("Not Found")
                    .to_string(),
            },
            Ok(_) => self.malformed("error body has no 'error.message' field".to_string()),
            Err(e) => self.malformed(format!("invalid error body: {e}")),
        }
    }

    fn malformed(&self, reason: String) -> ApiError {
        warn!(status = self.status.as_u16(), reason = %reason, "malformed backend response");
        ApiError::MalformedResponse {
            status: self.status.as_u16(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shorty_core::{ImageRecord, LinkRecord};

    const LINK_OK: &str = r#"{"status":"success","result":{"id":"abc","url":"https://example.com"}}"#;
    const LINK_ERR: &str = r#"{"status":"error","error":{"id":"-","message":"link not found"}}"#;

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse::new(StatusCode::from_u16(status).unwrap(), body)
    }

    #[test]
    fn classify_statuses() {
        assert_eq!(ResponseClass::of(StatusCode::OK), ResponseClass::Success);
        assert_eq!(ResponseClass::of(StatusCode::CREATED), ResponseClass::Success);
        assert_eq!(ResponseClass::of(StatusCode::NOT_FOUND), ResponseClass::NotFound);
        assert_eq!(ResponseClass::of(StatusCode::BAD_REQUEST), ResponseClass::Failure);
        assert_eq!(
            ResponseClass::of(StatusCode::INTERNAL_SERVER_ERROR),
            ResponseClass::Failure
        );
        assert_eq!(ResponseClass::of(StatusCode::FOUND), ResponseClass::Failure);
    }

    #[test]
    fn not_found_is_none_even_with_error_envelope() {
        let link: Option<LinkRecord> = response(404, LINK_ERR).into_optional().unwrap();
        assert!(link.is_none());
    }

    #[test]
    fn not_found_is_none_with_empty_body() {
        let image: Option<ImageRecord> = response(404, "").into_optional().unwrap();
        assert!(image.is_none());
    }

    #[test]
    fn success_decodes_record() {
        let link: Option<LinkRecord> = response(200, LINK_OK).into_optional().unwrap();
        assert_eq!(
            link,
            Some(LinkRecord {
                id: "abc".to_string(),
                url: "https://example.com".to_string(),
            })
        );
    }

    #[test]
    fn failure_carries_backend_message() {
        let err = response(500, LINK_ERR)
            .into_optional::<LinkRecord>()
            .unwrap_err();
        assert_eq!(err.to_string(), "link not found");
        assert!(matches!(err, ApiError::Backend { status: 500, .. }));
    }

    #[test]
    fn required_not_found_is_error() {
        let err = response(404, LINK_ERR)
            .into_required::<LinkRecord>()
            .unwrap_err();
        assert_eq!(err.to_string(), "link not found");
    }

    #[test]
    fn required_not_found_without_envelope_uses_reason() {
        let err = response(404, "<html>404</html>")
            .into_required::<LinkRecord>()
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Backend {
                status: 404,
                id: None,
                message: "Not Found".to_string(),
            }
        );
    }

    #[test]
    fn missing_result_is_malformed() {
        let err = response(200, r#"{"status":"success"}"#)
            .into_required::<LinkRecord>()
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { status: 200, .. }));
    }

    #[test]
    fn missing_record_field_is_malformed() {
        let err = response(200, r#"{"result":{"id":"abc"}}"#)
            .into_required::<LinkRecord>()
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { .. }));
    }

    #[test]
    fn empty_id_is_malformed() {
        let err = response(200, r#"{"result":{"id":"","url":"https://example.com"}}"#)
            .into_required::<LinkRecord>()
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { .. }));
    }

    #[test]
    fn non_json_failure_is_malformed() {
        let err = response(502, "Bad Gateway")
            .into_optional::<LinkRecord>()
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { status: 502, .. }));
    }

    #[test]
    fn failure_without_message_is_malformed() {
        let err = response(400, r#"{"status":"error","error":{"id":"WrongBody"}}"#)
            .into_optional::<LinkRecord>()
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { status: 400, .. }));
    }
}
