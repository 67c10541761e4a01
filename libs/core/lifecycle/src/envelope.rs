//! Boundary mapping from the error taxonomy to a transport envelope.
//!
//! Every lifecycle invocation answers with `{ "data": ..., "statusCode": n }`
//! whether it succeeded or not; no error escapes the boundary unwrapped.
//! Status assignment follows the tier that raised the failure:
//! presentation errors are plain bad requests (400), domain errors signal
//! unprocessable caller input (422), infrastructure errors are server
//! failures (500, or 504 for a timed-out collaborator).

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::errors::{ErrorCode, LifecycleError, PresentationError};
use crate::repository::Record;

#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub data: Value,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl Envelope {
    pub fn ok(data: impl Serialize) -> Self {
        Self::with_status(data, StatusCode::OK)
    }

    pub fn created(data: impl Serialize) -> Self {
        Self::with_status(data, StatusCode::CREATED)
    }

    pub fn with_status(data: impl Serialize, status: StatusCode) -> Self {
        Self {
            data: serde_json::to_value(data).unwrap_or(Value::Null),
            status_code: status.as_u16(),
        }
    }

    /// Envelope for a classified failure; `data` carries the error message.
    pub fn failure(error: &LifecycleError) -> Self {
        Self {
            data: Value::String(error.message().to_string()),
            status_code: status_for(error).as_u16(),
        }
    }

    /// Fallback for anything unclassified. The diagnostic detail stays
    /// server-side; the client only sees the generic catalog entry.
    pub fn crash(detail: impl std::fmt::Display) -> Self {
        error!(%detail, "unclassified failure at the boundary");
        Self {
            data: Value::String(ErrorCode::CrashLogic.description().to_string()),
            status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        }
    }
}

/// Transport status for a classified failure.
pub fn status_for(error: &LifecycleError) -> StatusCode {
    match error {
        LifecycleError::Presentation(_) => StatusCode::BAD_REQUEST,
        LifecycleError::Domain(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LifecycleError::Infrastructure(e) if e.code() == ErrorCode::Timeout => {
            StatusCode::GATEWAY_TIMEOUT
        }
        LifecycleError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for LifecycleError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        (status, Json(Envelope::failure(&self))).into_response()
    }
}

/// Guard the controller edge: a lifecycle payload must be a JSON object.
pub fn payload_object(value: Value) -> Result<Record, PresentationError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(PresentationError::with_detail(
            ErrorCode::PresentationValidation,
            format!("expected a JSON object, got {other}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{DomainError, InfrastructureError};
    use serde_json::json;

    #[test]
    fn tiers_map_to_their_status_classes() {
        let presentation: LifecycleError =
            PresentationError::new(ErrorCode::PresentationValidation).into();
        let domain: LifecycleError = DomainError::new(ErrorCode::InvalidFormat).into();
        let infrastructure: LifecycleError =
            InfrastructureError::new(ErrorCode::DbDeleteFail).into();
        let timeout: LifecycleError = InfrastructureError::new(ErrorCode::Timeout).into();

        assert_eq!(status_for(&presentation), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&domain), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_for(&infrastructure), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_for(&timeout), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn failure_envelope_carries_message_and_status() {
        let err: LifecycleError =
            DomainError::with_detail(ErrorCode::InvalidFormat, "two fields failed").into();
        let envelope = Envelope::failure(&err);
        assert_eq!(envelope.data, json!("two fields failed"));
        assert_eq!(envelope.status_code, 422);

        let wire = serde_json::to_value(&envelope).unwrap();
        assert_eq!(wire, json!({ "data": "two fields failed", "statusCode": 422 }));
    }

    #[test]
    fn crash_hides_diagnostics_from_the_client() {
        let envelope = Envelope::crash("stack trace goes to the log only");
        assert_eq!(envelope.status_code, 500);
        assert_eq!(envelope.data, json!("CRASH_LOGIC"));
    }

    #[test]
    fn non_object_payloads_are_presentation_errors() {
        let err = payload_object(json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.code(), ErrorCode::PresentationValidation);
        assert!(payload_object(json!({ "a": 1 })).is_ok());
    }
}
