//! Diagram generation endpoint.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use tracing::Instrument;

use umlsketch_types::diagram::{GeneratedDiagram, GenerationRequest};

use super::parse_body;
use crate::http::error::AppError;
use crate::state::AppState;

/// POST /api/generate - Generate a sequence diagram from a use-case description.
pub async fn generate_diagram(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GeneratedDiagram>, AppError> {
    let request_id = uuid::Uuid::now_v7();
    let span = tracing::info_span!("generate", %request_id);

    async move {
        let request: GenerationRequest = parse_body(&body)?;
        let diagram = state.generator.generate(&request).await?;

        tracing::info!(
            diagram_type = %diagram.diagram_type,
            code_len = diagram.code.len(),
            "Diagram generated"
        );
        Ok(Json(diagram))
    }
    .instrument(span)
    .await
}
