//! Shared domain types for umlsketch.
//!
//! Request and response shapes for the generate/render endpoints, the
//! structured diagram result the model is constrained to produce, LLM
//! request/response types, service configuration, and the error enums.
//!
//! Zero infrastructure dependencies -- only serde, schemars, thiserror.

pub mod config;
pub mod diagram;
pub mod error;
pub mod llm;
