//! Field templates for event parameter blocks
//!
//! A template is an ordered list of named, typed fields. Decoding walks the
//! parameter bytes front to back, little-endian, and yields the named values
//! the classifier reads by key.

use std::collections::HashMap;

use indexmap::IndexMap;

use framedata_core::config::{FieldConfig, FieldKind, TemplateConfig};

use super::{ATTACK_TYPE, RECOVERY_MARKER_TYPE, TemplateProvider};
use crate::error::{ConfigError, DecodeError};

/// Jump-table id field of a recovery-marker event.
pub const JUMP_TABLE_ID_FIELD: &str = "JumpTableID";

/// Hitbox-variant field of an attack event; 0 is a damage-dealing hitbox.
pub const ATTACK_VARIANT_FIELD: &str = "Unk04";

// ============================================================================
// Decoded Values
// ============================================================================

/// A decoded parameter value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    /// Any integer field
    Int(i64),
    /// `f32` field
    Float(f32),
    /// `b8` field
    Bool(bool),
}

impl FieldValue {
    /// Integer view of the value; floats have none.
    #[must_use]
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(v),
            Self::Bool(b) => Some(i64::from(b)),
            Self::Float(_) => None,
        }
    }
}

/// Named parameter values in template order.
pub type DecodedFields = IndexMap<String, FieldValue>;

// ============================================================================
// Templates
// ============================================================================

/// One field of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name
    pub name: String,
    /// Encoded type
    pub kind: FieldKind,
    /// Encoded width in bytes
    pub size: usize,
}

impl FieldSpec {
    /// Creates a field of the type's natural width (zero for `pad`).
    #[must_use]
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            size: kind.width().unwrap_or_default(),
        }
    }

    fn from_config(config: &FieldConfig, location: &str) -> Result<Self, ConfigError> {
        let size = match (config.kind.width(), config.size) {
            (Some(width), _) => width,
            (None, Some(size)) => size,
            (None, None) => {
                return Err(ConfigError::InvalidValue {
                    field: format!("{location}.{}.size", config.name),
                    value: "<missing>".to_string(),
                    expected: "a byte count for pad fields".to_string(),
                });
            }
        };
        Ok(Self {
            name: config.name.clone(),
            kind: config.kind,
            size,
        })
    }
}

/// Ordered parameter layout for one event type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldTemplate {
    /// Fields in byte order
    pub fields: Vec<FieldSpec>,
}

impl FieldTemplate {
    /// Creates a template from fields in byte order.
    #[must_use]
    pub const fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Decodes a parameter block into named values.
    ///
    /// Trailing bytes past the last field are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Truncated`] if the block ends inside a field.
    pub fn decode(&self, bytes: &[u8]) -> Result<DecodedFields, DecodeError> {
        let mut values = DecodedFields::with_capacity(self.fields.len());
        let mut offset: usize = 0;

        for field in &self.fields {
            let end = offset.saturating_add(field.size);
            let Some(raw) = bytes.get(offset..end) else {
                return Err(DecodeError::Truncated {
                    field: field.name.clone(),
                    offset,
                    needed: field.size,
                    available: bytes.len(),
                });
            };

            if let Some(value) = decode_value(field.kind, raw) {
                values.insert(field.name.clone(), value);
            }
            offset = end;
        }

        Ok(values)
    }
}

/// Decodes one little-endian value; `None` for padding or a width mismatch.
fn decode_value(kind: FieldKind, raw: &[u8]) -> Option<FieldValue> {
    let value = match kind {
        FieldKind::U8 => FieldValue::Int(i64::from(u8::from_le_bytes(raw.try_into().ok()?))),
        FieldKind::S8 => FieldValue::Int(i64::from(i8::from_le_bytes(raw.try_into().ok()?))),
        FieldKind::B8 => FieldValue::Bool(u8::from_le_bytes(raw.try_into().ok()?) != 0),
        FieldKind::U16 => FieldValue::Int(i64::from(u16::from_le_bytes(raw.try_into().ok()?))),
        FieldKind::S16 => FieldValue::Int(i64::from(i16::from_le_bytes(raw.try_into().ok()?))),
        FieldKind::U32 => FieldValue::Int(i64::from(u32::from_le_bytes(raw.try_into().ok()?))),
        FieldKind::S32 => FieldValue::Int(i64::from(i32::from_le_bytes(raw.try_into().ok()?))),
        FieldKind::F32 => FieldValue::Float(f32::from_le_bytes(raw.try_into().ok()?)),
        FieldKind::Pad => return None,
    };
    Some(value)
}

// ============================================================================
// Template Registry
// ============================================================================

/// Template registry keyed by event type, with optional per-version overrides.
#[derive(Debug, Clone)]
pub struct FieldTemplates {
    by_type: HashMap<i32, FieldTemplate>,
    by_version: HashMap<(u32, i32), FieldTemplate>,
}

impl Default for FieldTemplates {
    /// Built-in layouts for the two event types the classifier reads.
    fn default() -> Self {
        let mut by_type = HashMap::new();
        by_type.insert(
            RECOVERY_MARKER_TYPE,
            FieldTemplate::new(vec![FieldSpec::new(JUMP_TABLE_ID_FIELD, FieldKind::S32)]),
        );
        by_type.insert(
            ATTACK_TYPE,
            FieldTemplate::new(vec![
                FieldSpec::new("Unk00", FieldKind::S32),
                FieldSpec::new(ATTACK_VARIANT_FIELD, FieldKind::S32),
            ]),
        );
        Self {
            by_type,
            by_version: HashMap::new(),
        }
    }
}

impl FieldTemplates {
    /// Builds the registry from rule-file overrides on top of the built-ins.
    ///
    /// # Errors
    ///
    /// Returns an error if a `pad` field has no size.
    pub fn from_config(configs: &[TemplateConfig]) -> Result<Self, ConfigError> {
        let mut templates = Self::default();

        for (index, config) in configs.iter().enumerate() {
            let location = format!("templates[{index}]");
            let fields = config
                .fields
                .iter()
                .map(|f| FieldSpec::from_config(f, &location))
                .collect::<Result<Vec<_>, _>>()?;
            let template = FieldTemplate::new(fields);

            match config.version {
                Some(version) => {
                    templates
                        .by_version
                        .insert((version, config.type_code), template);
                }
                None => {
                    templates.by_type.insert(config.type_code, template);
                }
            }
        }

        Ok(templates)
    }
}

impl TemplateProvider for FieldTemplates {
    fn template(&self, version: u32, type_code: i32) -> Option<&FieldTemplate> {
        self.by_version
            .get(&(version, type_code))
            .or_else(|| self.by_type.get(&type_code))
    }
}
