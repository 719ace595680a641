//! Rule-file loader
//!
//! This module implements the configuration loading pipeline:
//! 1. Size check against [`ConfigLimits::max_config_size`]
//! 2. Read and strip a UTF-8 BOM
//! 3. YAML parsing
//! 4. Weapon id shape check (ids must stay strings)
//! 5. Deserialization to [`AnalyzerConfig`]
//! 6. Validation
//! 7. Compilation into a [`RuleSet`]

use std::path::Path;

use serde_yaml::Value;

use crate::config::validation::Validator;
use crate::error::ConfigError;
use crate::rules::RuleSet;

use framedata_core::config::AnalyzerConfig;

/// Label used in errors for rule files loaded from memory.
const INLINE_SOURCE: &str = "<inline>";

// ============================================================================
// Public API
// ============================================================================

/// Options for the rule-file loader.
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    /// Limits for rule-file size.
    pub config_limits: ConfigLimits,
}

/// Limits to prevent resource exhaustion.
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    /// Maximum rule-file size in bytes.
    pub max_config_size: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_config_size: env_or("FRAMEDATA_MAX_CONFIG_SIZE", 10 * 1024 * 1024),
        }
    }
}

/// Result of loading a rule file.
#[derive(Debug)]
pub struct LoadResult {
    /// The validated, compiled rule set.
    pub rules: RuleSet,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during rule-file loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

/// Rule-file loader.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a new loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a new loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Loads, validates and compiles a rule file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file is missing, unreadable or too large
    /// - YAML parsing or deserialization fails
    /// - Validation reports any error
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        let max_size = self.options.config_limits.max_config_size;
        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if file_size > max_size {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{file_size} bytes"),
                expected: format!("at most {max_size} bytes"),
            });
        }

        let raw_content = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        self.load_source(&raw_content, path)
    }

    /// Loads a rule file from an in-memory string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing, validation or compilation fails.
    pub fn load_from_str(&self, content: &str) -> Result<LoadResult, ConfigError> {
        self.load_source(content, Path::new(INLINE_SOURCE))
    }

    fn load_source(&self, raw_content: &str, path: &Path) -> Result<LoadResult, ConfigError> {
        let max_size = self.options.config_limits.max_config_size;
        if raw_content.len() > max_size {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{} bytes", raw_content.len()),
                expected: format!("at most {max_size} bytes"),
            });
        }

        // Handle UTF-8 BOM
        let raw_content = raw_content.strip_prefix('\u{feff}').unwrap_or(raw_content);

        let root: Value = serde_yaml::from_str(raw_content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })?;

        if root.is_null() {
            return Err(ConfigError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: "Rule file is empty".to_string(),
            });
        }

        check_weapon_ids(&root)?;

        let config: AnalyzerConfig =
            serde_yaml::from_value(root).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: format!("Failed to deserialize rule file: {e}"),
            })?;

        let validation_result = Validator::new().validate(&config);
        if validation_result.has_errors() {
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                errors: validation_result.errors,
            });
        }

        let warnings = validation_result
            .warnings
            .into_iter()
            .map(|issue| LoadWarning {
                message: issue.message,
                location: Some(issue.path),
            })
            .collect();

        Ok(LoadResult {
            rules: RuleSet::compile(&config)?,
            warnings,
        })
    }
}

/// Rejects unquoted weapon ids.
///
/// YAML reads `000100` as the integer `100`, which would silently lose the
/// leading zeros that make up the archive entry name.
fn check_weapon_ids(root: &Value) -> Result<(), ConfigError> {
    let Some(Value::Mapping(weapons)) = root.get("weapons") else {
        return Ok(());
    };

    match weapons.keys().find(|key| !key.is_string()) {
        Some(key) => Err(ConfigError::InvalidValue {
            field: "weapons".to_string(),
            value: serde_yaml::to_string(key).map_or_else(
                |_| format!("{key:?}"),
                |s| s.trim_end().to_string(),
            ),
            expected: "a quoted string id (e.g. \"000100\")".to_string(),
        }),
        None => Ok(()),
    }
}

/// Parses an environment variable with a default value.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ============================================================================
// Tests
// ============================================================================
