//! Application error type mapping to HTTP status codes and `{ error }` bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use umlsketch_types::error::DiagramError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Endpoint called with a verb other than POST.
    MethodNotAllowed,
    /// Generation or rendering failure.
    Diagram(DiagramError),
    /// Anything else that went wrong inside a handler.
    Internal(String),
}

impl From<DiagramError> for AppError {
    fn from(e: DiagramError) -> Self {
        AppError::Diagram(e)
    }
}

impl AppError {
    /// Status code and client-facing message.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string())
            }
            AppError::Diagram(DiagramError::MissingDescription) => {
                (StatusCode::BAD_REQUEST, "Описание обязательно".to_string())
            }
            AppError::Diagram(DiagramError::DescriptionTooLong { max }) => (
                StatusCode::BAD_REQUEST,
                format!("Описание слишком длинное (максимум {max} символов)"),
            ),
            AppError::Diagram(DiagramError::MissingCode) => {
                (StatusCode::BAD_REQUEST, "Код диаграммы обязателен".to_string())
            }
            AppError::Diagram(DiagramError::NotConfigured) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "API ключ OpenAI не настроен на сервере".to_string(),
            ),
            AppError::Diagram(DiagramError::Forbidden) => {
                (StatusCode::FORBIDDEN, "Неверный код доступа".to_string())
            }
            AppError::Diagram(DiagramError::UpstreamParse(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to parse AI response".to_string(),
            ),
            AppError::Diagram(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = ?self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = ?self, "Request rejected");
        }

        let body = json!({ "error": message });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
