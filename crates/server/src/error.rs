use acremote_controller::TransportError;
use acremote_core::{StatusResponse, ValidationError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("command task failed: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(err) => (StatusCode::UNPROCESSABLE_ENTITY, Json(err)).into_response(),
            ApiError::Transport(err) => {
                tracing::warn!(error = %err, "Controller did not take the command");
                (StatusCode::BAD_GATEWAY, Json(StatusResponse::error(err.to_string()))).into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Command task failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(StatusResponse::error("internal error"))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acremote_core::AcState;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn unreachable_controller_is_bad_gateway() {
        let err = ApiError::from(TransportError::Unreachable { port: "/dev/ttyUSB9".into() });
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body,
            serde_json::json!({"message": "controller on /dev/ttyUSB9 is unreachable", "status": "error"})
        );
    }

    #[tokio::test]
    async fn missing_ack_is_bad_gateway() {
        let err = ApiError::from(TransportError::NotAcknowledged {
            port: "/dev/ttyUSB0".into(),
            waited: std::time::Duration::from_secs(1),
        });
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "controller on /dev/ttyUSB0 did not acknowledge within 1s");
    }

    #[tokio::test]
    async fn failed_command_task_is_internal_error() {
        let (status, body) = render(ApiError::Internal("task 7 panicked".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"message": "internal error", "status": "error"}));
    }

    #[tokio::test]
    async fn panicked_join_handle_maps_to_internal() {
        let join_err = tokio::spawn(async { panic!("forward blew up") }).await.unwrap_err();
        assert!(join_err.is_panic());
        let (status, _) = render(ApiError::Internal(join_err.to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn validation_error_is_unprocessable() {
        let err = AcState::from_body(b"").unwrap_err();
        let (status, body) = render(ApiError::from(err)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            serde_json::json!({"detail": [{"type": "missing", "loc": ["body"], "msg": "Field required"}]})
        );
    }
}
