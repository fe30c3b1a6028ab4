//! Observability setup for umlsketch: structured logging with optional
//! OpenTelemetry span export.

pub mod tracing_setup;
