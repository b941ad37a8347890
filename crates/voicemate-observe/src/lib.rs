//! Logging and tracing setup shared by the Voicemate binary.

pub mod tracing_setup;
