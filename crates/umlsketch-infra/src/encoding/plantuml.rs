//! PlantUML text encoding for image URLs.
//!
//! Implements the `MarkupEncoder` trait from `umlsketch-core` the way the
//! PlantUML server expects: UTF-8 text, raw DEFLATE (no zlib header), then a
//! base64 variant over the alphabet `0-9A-Za-z-_`. A trailing partial
//! 3-byte group is zero-filled before encoding, so segments are always a
//! multiple of four characters.

use std::io::{Read, Write};

use base64::Engine as _;
use base64::alphabet::Alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;

use umlsketch_core::diagram::link::MarkupEncoder;
use umlsketch_types::error::EncodeError;

const PLANTUML_ALPHABET: Alphabet =
    match Alphabet::new("0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_") {
        Ok(alphabet) => alphabet,
        Err(_) => panic!("invalid PlantUML alphabet"),
    };

const PLANTUML_BASE64: GeneralPurpose = GeneralPurpose::new(
    &PLANTUML_ALPHABET,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// PlantUML implementation of `MarkupEncoder`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlantUmlEncoder;

impl PlantUmlEncoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        Self
    }
}

impl MarkupEncoder for PlantUmlEncoder {
    fn encode(&self, markup: &str) -> Result<String, EncodeError> {
        let mut deflater = DeflateEncoder::new(Vec::new(), Compression::best());
        deflater
            .write_all(markup.as_bytes())
            .map_err(|e| EncodeError::Compression(e.to_string()))?;
        let mut compressed = deflater
            .finish()
            .map_err(|e| EncodeError::Compression(e.to_string()))?;

        let partial = compressed.len() % 3;
        if partial != 0 {
            compressed.resize(compressed.len() + 3 - partial, 0);
        }

        Ok(PLANTUML_BASE64.encode(&compressed))
    }

    fn decode(&self, segment: &str) -> Result<String, EncodeError> {
        let compressed = PLANTUML_BASE64
            .decode(segment.trim())
            .map_err(|e| EncodeError::InvalidSegment(e.to_string()))?;

        // Inflate stops at the end of the deflate stream, so zero fill after
        // it is ignored.
        let mut bytes = Vec::new();
        DeflateDecoder::new(compressed.as_slice())
            .read_to_end(&mut bytes)
            .map_err(|e| EncodeError::InvalidSegment(e.to_string()))?;

        String::from_utf8(bytes).map_err(|_| EncodeError::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";

    #[test]
    fn test_roundtrip_simple_diagram() {
        let encoder = PlantUmlEncoder::new();
        let code = "@startuml\nAlice -> Bob: Hi\n@enduml";
        let segment = encoder.encode(code).unwrap();
        assert!(!segment.is_empty());
        assert_eq!(encoder.decode(&segment).unwrap(), code);
    }

    #[test]
    fn test_roundtrip_cyrillic_and_whitespace() {
        let encoder = PlantUmlEncoder::new();
        let code = "@startuml\nactor Пользователь\nПользователь -> Backend: Войти POST /login\n\t\n@enduml\n";
        let segment = encoder.encode(code).unwrap();
        assert_eq!(encoder.decode(&segment).unwrap(), code);
    }

    #[test]
    fn test_roundtrip_empty_markup() {
        let encoder = PlantUmlEncoder::new();
        let segment = encoder.encode("").unwrap();
        assert_eq!(encoder.decode(&segment).unwrap(), "");
    }

    #[test]
    fn test_encode_deterministic() {
        let encoder = PlantUmlEncoder::new();
        let code = "@startuml\nBob -> Alice : hello\n@enduml";
        assert_eq!(encoder.encode(code).unwrap(), encoder.encode(code).unwrap());
    }

    #[test]
    fn test_encoded_segment_is_url_safe_groups_of_four() {
        let encoder = PlantUmlEncoder::new();
        for code in ["A", "AB", "ABC", "@startuml\nA -> B\n@enduml", &"x".repeat(1000)] {
            let segment = encoder.encode(code).unwrap();
            assert_eq!(segment.len() % 4, 0, "{code:?} -> {segment}");
            assert!(segment.chars().all(|c| ALPHABET.contains(c)));
        }
    }

    #[test]
    fn test_decode_reference_segment() {
        // Segment from the PlantUML text-encoding documentation.
        let encoder = PlantUmlEncoder::new();
        assert_eq!(
            encoder.decode("SyfFKj2rKt3CoKnELR1Io4ZDoSa70000").unwrap(),
            "Bob -> Alice : hello"
        );
        assert_eq!(encoder.decode("SrJGjLDmibBmICt9oGS0").unwrap(), "A -> B: Hello");
    }

    #[test]
    fn test_decode_rejects_foreign_symbols() {
        let encoder = PlantUmlEncoder::new();
        assert!(matches!(
            encoder.decode("abc+/=="),
            Err(EncodeError::InvalidSegment(_))
        ));
    }

    #[test]
    fn test_decode_rejects_garbage_stream() {
        let encoder = PlantUmlEncoder::new();
        assert!(encoder.decode("____").is_err());
    }
}
