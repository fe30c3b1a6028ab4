//! Diagram rendering service.
//!
//! `DiagramRenderer` turns caller-supplied markup into an image URL without
//! touching the LLM. The markup is used verbatim: no trimming and no marker
//! enforcement, so user edits render exactly as written.

use umlsketch_types::diagram::{RenderRequest, RenderedDiagram};
use umlsketch_types::error::DiagramError;

use crate::diagram::link::{ImageLinkBuilder, MarkupEncoder};

/// Renders existing markup into an image reference.
pub struct DiagramRenderer<E: MarkupEncoder> {
    links: ImageLinkBuilder<E>,
}

impl<E: MarkupEncoder> DiagramRenderer<E> {
    pub fn new(links: ImageLinkBuilder<E>) -> Self {
        Self { links }
    }

    /// Build the image URL for the request's code.
    pub fn render(&self, request: &RenderRequest) -> Result<RenderedDiagram, DiagramError> {
        let code = request
            .code
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or(DiagramError::MissingCode)?;

        let image_url = self.links.image_url(code)?;
        tracing::debug!(code_len = code.len(), "Rendered diagram link");
        Ok(RenderedDiagram { image_url })
    }

    /// Recover markup from a previously issued image URL or encoded segment.
    pub fn decode(&self, url_or_segment: &str) -> Result<String, DiagramError> {
        Ok(self.links.markup_from_url(url_or_segment)?)
    }
}
