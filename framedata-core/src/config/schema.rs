//! Rule-file schema types
//!
//! These types are deserialized from the YAML rule file. Mapping order is
//! significant throughout: weapons are processed, and detail patterns are
//! tried, in the order they appear in the file. `IndexMap` keeps that order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// Top-Level Configuration
// ============================================================================

/// Root of a rule file.
///
/// ```yaml
/// weapons:
///   "000": Fists
///   "001": Straight Sword
/// anim_kinds:
///   R1: "^3000\\d\\d$"
///   Running:
///     pattern: "^3040\\d\\d$"
///     details:
///       "^304000$": Running R1
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AnalyzerConfig {
    /// Weapon id → display label, in report-processing order.
    ///
    /// Ids are archive-relative identifiers and should be quoted in YAML so
    /// leading zeros survive.
    #[serde(default)]
    pub weapons: IndexMap<String, String>,

    /// Animation-kind label → classification rule.
    #[serde(default, alias = "animKind", alias = "anim_kind")]
    pub anim_kinds: IndexMap<String, AnimKindConfig>,

    /// Report presentation defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportConfig>,

    /// Field-template overrides for event parameter decoding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<Vec<TemplateConfig>>,
}

impl AnalyzerConfig {
    /// Iterates weapons as `(id, label)` pairs in configured order.
    pub fn weapon_entries(&self) -> impl Iterator<Item = WeaponEntry> + '_ {
        self.weapons.iter().map(|(id, label)| WeaponEntry {
            id: id.clone(),
            label: label.clone(),
        })
    }
}

/// A configured weapon: archive identifier plus the label it is reported under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponEntry {
    /// Archive-relative identifier (e.g. `"000"`)
    pub id: String,
    /// Display label (e.g. `"Fists"`)
    pub label: String,
}

// ============================================================================
// Animation Kinds
// ============================================================================

/// Classification rule for one animation kind.
///
/// Accepts a bare regex string as shorthand for `{ pattern: <regex> }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnimKindConfig {
    /// Shorthand: a single primary pattern
    Pattern(String),

    /// Full form with optional ordered detail patterns
    Rules {
        /// Primary pattern, tried after every detail pattern
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,

        /// Ordered regex → detail label pairs
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<IndexMap<String, String>>,
    },
}

impl AnimKindConfig {
    /// Returns the primary pattern, if any.
    #[must_use]
    pub fn primary_pattern(&self) -> Option<&str> {
        match self {
            Self::Pattern(p) => Some(p.as_str()),
            Self::Rules { pattern, .. } => pattern.as_deref(),
        }
    }

    /// Returns the detail patterns as ordered `(regex, label)` pairs.
    #[must_use]
    pub fn detail_patterns(&self) -> Vec<(&str, &str)> {
        match self {
            Self::Pattern(_) => Vec::new(),
            Self::Rules { details, .. } => details
                .iter()
                .flatten()
                .map(|(pattern, label)| (pattern.as_str(), label.as_str()))
                .collect(),
        }
    }
}

// ============================================================================
// Report Settings
// ============================================================================

/// Report presentation defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReportConfig {
    /// Ordering of the top-level kind groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_order: Option<OuterOrder>,
}

/// Ordering of the top-level (kind) groups in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum OuterOrder {
    /// Order of first occurrence (default)
    #[default]
    Insertion,
    /// Sorted by kind label
    Alphabetical,
}

// ============================================================================
// Field Templates
// ============================================================================

/// Parameter layout for one event type.
///
/// ```yaml
/// templates:
///   - type: 1
///     fields:
///       - { name: Unk00, type: s32 }
///       - { name: Unk04, type: s32 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Event type code this layout applies to
    #[serde(rename = "type")]
    pub type_code: i32,

    /// Restricts the layout to one container version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// Fields in byte order
    pub fields: Vec<FieldConfig>,
}

/// A single named field within a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Field name as read by the classifier
    pub name: String,

    /// Encoded field type
    #[serde(rename = "type")]
    pub kind: FieldKind,

    /// Byte count for `pad` fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
}

/// Little-endian encoded field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Unsigned 8-bit integer
    U8,
    /// Signed 8-bit integer
    S8,
    /// Boolean stored in one byte
    B8,
    /// Unsigned 16-bit integer
    U16,
    /// Signed 16-bit integer
    S16,
    /// Unsigned 32-bit integer
    U32,
    /// Signed 32-bit integer
    S32,
    /// 32-bit float
    F32,
    /// Skipped bytes (`size` required)
    Pad,
}

impl FieldKind {
    /// Encoded width in bytes; `None` for `pad`, whose width is configured.
    #[must_use]
    pub const fn width(self) -> Option<usize> {
        match self {
            Self::U8 | Self::S8 | Self::B8 => Some(1),
            Self::U16 | Self::S16 => Some(2),
            Self::U32 | Self::S32 | Self::F32 => Some(4),
            Self::Pad => None,
        }
    }
}
