//! Business logic and port traits for umlsketch.
//!
//! This crate defines the "ports" (provider and encoder traits) that the
//! infrastructure layer implements, plus the two request services built on
//! them. It depends only on `umlsketch-types` -- never on `umlsketch-infra`
//! or any network/IO crate.

pub mod diagram;
pub mod llm;
pub mod service;
