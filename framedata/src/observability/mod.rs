//! Observability
//!
//! Structured logging for analysis runs.

pub mod logging;

pub use logging::{LogFormat, init_logging};
