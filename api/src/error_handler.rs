use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use ai_answer_service::error_handler::AiAnswerError;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("configuration error: {0}")]
    Config(#[source] AiAnswerError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Rich HTTP error mapped from the answer service with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // startup-only
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // 4xx
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,

            // custom mapped
            AppError::Http { status, .. } => *status,

            // 5xx
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Http { code, .. } => code,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Convert common Axum rejections to `AppError`.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Map answer-service failures onto the HTTP surface:
/// - upstream non-2xx keeps the remote status and relays the remote body
///   verbatim in the message;
/// - list-shaped extraction failures become 422;
/// - transport/decode failures become 502.
impl From<AiAnswerError> for AppError {
    fn from(err: AiAnswerError) -> Self {
        match err {
            AiAnswerError::Upstream { status, .. } => AppError::Http {
                status,
                code: "UPSTREAM_ERROR",
                message: err.to_string(),
            },
            AiAnswerError::Extraction(e) => AppError::Http {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                code: "UNPROCESSABLE_CONTENT",
                message: e.to_string(),
            },
            AiAnswerError::Config(_) => AppError::Config(err),
            other => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "ANSWER_SERVICE_ERROR",
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_answer_service::extract::{ExtractError, RecordKind};

    #[test]
    fn upstream_error_keeps_status_and_body() {
        let err = AppError::from(AiAnswerError::Upstream {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: "{\"error\":\"rate limited\"}".into(),
        });
        let AppError::Http {
            status,
            code,
            message,
        } = &err
        else {
            panic!("expected Http variant");
        };
        assert_eq!(*status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(*code, "UPSTREAM_ERROR");
        assert!(message.contains("rate limited"));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn extraction_failure_maps_to_unprocessable_entity() {
        let err = AppError::from(AiAnswerError::from(ExtractError::Unprocessable(
            RecordKind::Product,
        )));
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn other_service_failures_map_to_bad_gateway() {
        let err = AppError::from(AiAnswerError::EmptyChoices);
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
