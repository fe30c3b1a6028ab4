//! Infrastructure implementations for umlsketch.
//!
//! Concrete adapters for the ports defined in `umlsketch-core`: the
//! OpenAI-compatible LLM provider and the PlantUML markup encoder, plus
//! configuration and secret loading.

pub mod config;
pub mod encoding;
pub mod llm;
pub mod secret;
