//! Rule-file configuration
//!
//! Schema types live in `framedata-core`; this module loads and validates
//! rule files and hands back a compiled [`RuleSet`](crate::rules::RuleSet).

pub mod loader;
pub mod validation;

pub use framedata_core::config::*;
pub use loader::{ConfigLimits, ConfigLoader, LoadResult, LoadWarning, LoaderOptions};
pub use validation::{ValidationResult, Validator};
