//! HTTP API layer for umlsketch.
//!
//! Two POST endpoints (`/api/generate`, `/api/render`) plus their legacy
//! `/.netlify/functions/*` aliases. Bodies are plain JSON; every error is
//! `{ "error": message }`.

pub mod error;
pub mod handlers;
pub mod router;
