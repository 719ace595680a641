//! Compiled rule set
//!
//! Turns a deserialized [`AnalyzerConfig`] into the read-only structure the
//! pipeline borrows: weapons in configured order, kind rules with every
//! regex compiled up front, field templates, and report defaults.

use regex::{Regex, RegexBuilder};

use framedata_core::config::{AnalyzerConfig, AnimKindConfig, OuterOrder, WeaponEntry};

use crate::error::ConfigError;
use crate::timeline::FieldTemplates;

/// Compile-size ceiling for configured regexes.
const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// One animation kind with its patterns in resolution order.
#[derive(Debug, Clone)]
pub struct CompiledKindRule {
    label: String,
    patterns: Vec<(Regex, String)>,
}

impl CompiledKindRule {
    /// Compiles a kind rule.
    ///
    /// Resolution order is every detail pattern in configured order, then the
    /// primary pattern labelled with the kind itself.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern is not a valid regex, or if the rule
    /// has no patterns at all.
    pub fn compile(label: &str, config: &AnimKindConfig) -> Result<Self, ConfigError> {
        let mut patterns = Vec::new();

        for (pattern, detail) in config.detail_patterns() {
            let field = format!("anim_kinds.{label}.details");
            patterns.push((compile_pattern(&field, pattern)?, detail.to_string()));
        }

        if let Some(pattern) = config.primary_pattern() {
            let field = format!("anim_kinds.{label}.pattern");
            patterns.push((compile_pattern(&field, pattern)?, label.to_string()));
        }

        if patterns.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("anim_kinds.{label}"),
                value: "<no patterns>".to_string(),
                expected: "a 'pattern', a 'details' mapping, or both".to_string(),
            });
        }

        Ok(Self {
            label: label.to_string(),
            patterns,
        })
    }

    /// Kind label used as the report's top-level key.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Patterns and the labels they resolve to, in resolution order.
    #[must_use]
    pub fn patterns(&self) -> &[(Regex, String)] {
        &self.patterns
    }
}

pub(crate) fn compile_pattern(field: &str, pattern: &str) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|e| ConfigError::InvalidValue {
            field: field.to_string(),
            value: pattern.to_string(),
            expected: format!("valid regex: {e}"),
        })
}

/// The read-only rule set shared by every pipeline stage.
#[derive(Debug, Clone)]
pub struct RuleSet {
    weapons: Vec<WeaponEntry>,
    kinds: Vec<CompiledKindRule>,
    templates: FieldTemplates,
    outer_order: OuterOrder,
}

impl RuleSet {
    /// Compiles a rule file.
    ///
    /// # Errors
    ///
    /// Returns an error if a regex or a field template is invalid.
    pub fn compile(config: &AnalyzerConfig) -> Result<Self, ConfigError> {
        let kinds = config
            .anim_kinds
            .iter()
            .map(|(label, rule)| CompiledKindRule::compile(label, rule))
            .collect::<Result<Vec<_>, _>>()?;

        let templates = match &config.templates {
            Some(templates) => FieldTemplates::from_config(templates)?,
            None => FieldTemplates::default(),
        };

        Ok(Self {
            weapons: config.weapon_entries().collect(),
            kinds,
            templates,
            outer_order: config
                .report
                .as_ref()
                .and_then(|r| r.outer_order)
                .unwrap_or_default(),
        })
    }

    /// Weapons in configured order.
    #[must_use]
    pub fn weapons(&self) -> &[WeaponEntry] {
        &self.weapons
    }

    /// Kind rules in configured order.
    #[must_use]
    pub fn kinds(&self) -> &[CompiledKindRule] {
        &self.kinds
    }

    /// Field templates for parameter decoding.
    #[must_use]
    pub const fn templates(&self) -> &FieldTemplates {
        &self.templates
    }

    /// Outer-group ordering configured in the rule file.
    #[must_use]
    pub const fn outer_order(&self) -> OuterOrder {
        self.outer_order
    }
}
