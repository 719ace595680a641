//! Rule-file validation
//!
//! Runs on the deserialized [`AnalyzerConfig`] before compilation. All issues
//! are collected (not just the first) so a single run reports everything.

use std::collections::HashSet;

use framedata_core::config::{AnalyzerConfig, AnimKindConfig, FieldKind, TemplateConfig};

use crate::error::{ConfigError, Severity, ValidationIssue};
use crate::report::is_excluded_weapon_label;
use crate::rules::compile_pattern;

// ============================================================================
// Public API
// ============================================================================

/// Result of rule-file validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Rule-file validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a rule file and returns every issue found.
    pub fn validate(&mut self, config: &AnalyzerConfig) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_weapons(config);
        self.validate_anim_kinds(config);
        if let Some(templates) = &config.templates {
            self.validate_templates(templates);
        }

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    fn validate_weapons(&mut self, config: &AnalyzerConfig) {
        if config.weapons.is_empty() {
            self.add_warning("weapons", "No weapons configured; the report will be empty");
        }

        for (id, label) in &config.weapons {
            let path = format!("weapons.{id}");
            if id.is_empty() {
                self.add_error("weapons", "Weapon id cannot be empty");
            }
            if label.is_empty() {
                self.add_error(&path, "Weapon label cannot be empty");
            } else if is_excluded_weapon_label(label) {
                self.add_warning(
                    &path,
                    &format!("Weapon label '{label}' is excluded and will never be rendered"),
                );
            }
        }
    }

    fn validate_anim_kinds(&mut self, config: &AnalyzerConfig) {
        if config.anim_kinds.is_empty() {
            self.add_warning("anim_kinds", "No animation kinds configured; nothing will match");
        }

        for (label, rule) in &config.anim_kinds {
            let path = format!("anim_kinds.{label}");
            if label.is_empty() {
                self.add_error("anim_kinds", "Animation kind label cannot be empty");
            }
            self.validate_kind_rule(&path, rule);
        }
    }

    fn validate_kind_rule(&mut self, path: &str, rule: &AnimKindConfig) {
        let details = rule.detail_patterns();

        if rule.primary_pattern().is_none() && details.is_empty() {
            self.add_error(path, "Rule needs a 'pattern', a 'details' mapping, or both");
        }

        if let Some(pattern) = rule.primary_pattern() {
            self.check_pattern(&format!("{path}.pattern"), pattern);
        }

        let details_path = format!("{path}.details");
        let mut seen = HashSet::new();
        for (pattern, detail) in details {
            self.check_pattern(&details_path, pattern);
            if detail.is_empty() {
                self.add_error(
                    &details_path,
                    &format!("Detail label for pattern '{pattern}' cannot be empty"),
                );
            } else if !seen.insert(detail) {
                self.add_warning(
                    &details_path,
                    &format!("Detail label '{detail}' is used by more than one pattern"),
                );
            }
        }
    }

    fn check_pattern(&mut self, path: &str, pattern: &str) {
        if let Err(ConfigError::InvalidValue { expected, .. }) = compile_pattern(path, pattern) {
            self.add_error(path, &format!("Pattern '{pattern}' is not a {expected}"));
        }
    }

    fn validate_templates(&mut self, templates: &[TemplateConfig]) {
        let mut keys = HashSet::new();

        for (index, template) in templates.iter().enumerate() {
            let path = format!("templates[{index}]");

            if !keys.insert((template.type_code, template.version)) {
                self.add_warning(
                    &path,
                    &format!(
                        "Duplicate template for event type {}; the last one wins",
                        template.type_code
                    ),
                );
            }

            if template.fields.is_empty() {
                self.add_warning(&path, "Template has no fields");
            }

            for field in &template.fields {
                if field.kind == FieldKind::Pad && field.size.is_none() {
                    self.add_error(
                        &format!("{path}.{}.size", field.name),
                        "Pad fields need a byte count",
                    );
                }
            }
        }
    }

    /// Adds an error to the collection.
    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    /// Adds a warning to the collection.
    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

// ============================================================================
// Tests
// ============================================================================
