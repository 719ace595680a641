//! Event classifier
//!
//! Decodes an event's parameters through its field template and decides
//! whether it opens a hitbox window, marks combo recovery, or is ignored.

use crate::error::DecodeError;
use crate::timeline::template::{ATTACK_VARIANT_FIELD, JUMP_TABLE_ID_FIELD};
use crate::timeline::{DecodedFields, EventKind, TemplateProvider, TimelineEvent};

use super::attack_info::AttackWindow;

/// Jump-table ids that mark the start of combo recovery, checked in order.
pub const COMBO_RECOVERY_JUMP_TABLE_IDS: [i64; 2] = [4, 116];

/// What one event contributes to an animation's frame data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClassifiedEvent {
    /// A damage-dealing hitbox window
    Attack(AttackWindow),
    /// Combo recovery begins at this time
    RecoveryStart(f32),
    /// Contributes nothing
    Ignored,
}

/// Classifies events from one timeline container.
#[derive(Debug)]
pub struct EventClassifier<'a, T: ?Sized> {
    templates: &'a T,
    version: u32,
}

impl<T: ?Sized> Clone for EventClassifier<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for EventClassifier<'_, T> {}

impl<'a, T: TemplateProvider + ?Sized> EventClassifier<'a, T> {
    /// Creates a classifier for a container of the given version.
    #[must_use]
    pub const fn new(templates: &'a T, version: u32) -> Self {
        Self { templates, version }
    }

    /// Decodes an event's parameter block with its type's template.
    ///
    /// # Errors
    ///
    /// Returns an error if no template exists for the event type or the
    /// parameters do not fit it.
    pub fn decode_parameters(&self, event: &TimelineEvent) -> Result<DecodedFields, DecodeError> {
        let template = self
            .templates
            .template(self.version, event.type_code)
            .ok_or(DecodeError::MissingTemplate {
                version: self.version,
                type_code: event.type_code,
            })?;
        template.decode(&event.params)
    }

    /// Classifies a single event.
    ///
    /// Events of other types are ignored without decoding.
    ///
    /// # Errors
    ///
    /// Returns an error if a recognized event cannot be decoded or lacks the
    /// field its classification reads.
    pub fn classify(&self, event: &TimelineEvent) -> Result<ClassifiedEvent, DecodeError> {
        match event.kind() {
            EventKind::Attack => {
                let fields = self.decode_parameters(event)?;
                let variant = required_field(&fields, event, ATTACK_VARIANT_FIELD)?;
                if variant == Some(0) {
                    Ok(ClassifiedEvent::Attack(AttackWindow {
                        start: event.start_time,
                        end: event.end_time,
                    }))
                } else {
                    Ok(ClassifiedEvent::Ignored)
                }
            }
            EventKind::RecoveryMarker => {
                let fields = self.decode_parameters(event)?;
                let jump_table_id = required_field(&fields, event, JUMP_TABLE_ID_FIELD)?;
                let is_combo_recovery = COMBO_RECOVERY_JUMP_TABLE_IDS
                    .iter()
                    .any(|id| jump_table_id == Some(*id));
                if is_combo_recovery {
                    Ok(ClassifiedEvent::RecoveryStart(event.start_time))
                } else {
                    Ok(ClassifiedEvent::Ignored)
                }
            }
            EventKind::Other => Ok(ClassifiedEvent::Ignored),
        }
    }
}

/// Reads a field's integer view; errors if the template never produced it.
fn required_field(
    fields: &DecodedFields,
    event: &TimelineEvent,
    name: &str,
) -> Result<Option<i64>, DecodeError> {
    fields
        .get(name)
        .map(|value| value.as_i64())
        .ok_or_else(|| DecodeError::MissingField {
            type_code: event.type_code,
            field: name.to_string(),
        })
}
