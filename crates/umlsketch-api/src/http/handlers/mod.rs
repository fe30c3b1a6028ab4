//! Request handlers, one module per endpoint.

pub mod generate;
pub mod render;

use serde::de::DeserializeOwned;

use crate::http::error::AppError;

/// Parse a JSON request body.
///
/// Malformed bodies surface as internal errors carrying the parser message,
/// the same as any other unexpected failure inside a handler.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::Internal(e.to_string()))
}
