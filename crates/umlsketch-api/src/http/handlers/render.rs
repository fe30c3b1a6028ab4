//! Diagram rendering endpoint.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;

use umlsketch_types::diagram::{RenderRequest, RenderedDiagram};

use super::parse_body;
use crate::http::error::AppError;
use crate::state::AppState;

/// POST /api/render - Build an image URL for user-supplied markup.
pub async fn render_diagram(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RenderedDiagram>, AppError> {
    let request_id = uuid::Uuid::now_v7();
    let _guard = tracing::info_span!("render", %request_id).entered();

    let request: RenderRequest = parse_body(&body)?;
    let rendered = state.renderer.render(&request)?;
    Ok(Json(rendered))
}
