//! Image link construction.
//!
//! `MarkupEncoder` is defined in umlsketch-core so services can build image
//! URLs without coupling to a specific text encoding. The PlantUML adapter
//! (`PlantUmlEncoder`) lives in umlsketch-infra.

use umlsketch_types::error::EncodeError;

/// Reversible, deterministic transform from markup text to a URL segment.
pub trait MarkupEncoder: Send + Sync {
    /// Encode markup into a URL-safe segment.
    fn encode(&self, markup: &str) -> Result<String, EncodeError>;

    /// Recover the original markup from a segment produced by [`encode`].
    ///
    /// [`encode`]: MarkupEncoder::encode
    fn decode(&self, segment: &str) -> Result<String, EncodeError>;
}

/// Maps markup to a fetchable image URL on the rendering service.
///
/// Pure: no network call is made, and identical markup always yields an
/// identical URL.
#[derive(Debug, Clone)]
pub struct ImageLinkBuilder<E: MarkupEncoder> {
    base_url: String,
    encoder: E,
}

impl<E: MarkupEncoder> ImageLinkBuilder<E> {
    /// Create a builder appending encoded segments to `base_url`.
    ///
    /// A trailing `/` is added to the base URL when missing.
    pub fn new(base_url: impl Into<String>, encoder: E) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url, encoder }
    }

    /// The base URL segments are appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the image URL for `markup`.
    pub fn image_url(&self, markup: &str) -> Result<String, EncodeError> {
        let segment = self.encoder.encode(markup)?;
        Ok(format!("{}{segment}", self.base_url))
    }

    /// Recover markup from an image URL or a bare encoded segment.
    ///
    /// Any query string or fragment is ignored; only the last path segment is
    /// decoded.
    pub fn markup_from_url(&self, url_or_segment: &str) -> Result<String, EncodeError> {
        let path = url_or_segment
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let segment = path.rsplit('/').next().unwrap_or_default();
        if segment.is_empty() {
            return Err(EncodeError::InvalidSegment("empty segment".to_string()));
        }
        self.encoder.decode(segment)
    }
}
