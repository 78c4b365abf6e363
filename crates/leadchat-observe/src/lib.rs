//! Observability setup for leadchat: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
