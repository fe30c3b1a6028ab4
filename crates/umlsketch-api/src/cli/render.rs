//! Render and decode commands: markup to image URL and back.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

use umlsketch_types::diagram::RenderRequest;

use crate::state::AppState;

/// Print the image URL for markup read from `file`, or stdin when absent.
pub async fn render(state: &AppState, file: Option<&Path>, json: bool) -> Result<()> {
    let code = match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read markup from stdin")?;
            buf
        }
    };

    let rendered = state.renderer.render(&RenderRequest { code: Some(code) })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        println!("{}", rendered.image_url);
    }

    Ok(())
}

/// Print the markup encoded in an image URL or bare segment.
pub fn decode(state: &AppState, input: &str, json: bool) -> Result<()> {
    let code = state.renderer.decode(input)?;

    if json {
        println!("{}", serde_json::json!({ "code": code }));
    } else {
        println!("{code}");
    }

    Ok(())
}
