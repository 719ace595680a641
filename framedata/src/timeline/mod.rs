//! Animation timelines and the collaborators that produce them
//!
//! The analyzer reads weapons out of an archive, decodes each entry into
//! animation timelines, and decodes individual event parameters through
//! field templates. Each of those steps sits behind a trait so the analysis
//! pipeline only depends on the narrow contract:
//!
//! - [`ArchiveReader`]: entry listing and raw bytes
//! - [`TimelineDecoder`]: container recognition and timeline decoding
//! - [`TemplateProvider`]: parameter layouts per event type
//!
//! One implementation of each ships with the crate.

pub mod archive;
pub mod decoder;
pub mod template;

pub use archive::{DirectoryArchive, locate_timeline_entry};
pub use decoder::{CONTAINER_FORMAT, JsonTimelineDecoder};
pub use template::{DecodedFields, FieldSpec, FieldTemplate, FieldTemplates, FieldValue};

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Event type code of a jump-table (recovery marker) event.
pub const RECOVERY_MARKER_TYPE: i32 = 0;

/// Event type code of an attack-behavior (hitbox) event.
pub const ATTACK_TYPE: i32 = 1;

// ============================================================================
// Timeline Types
// ============================================================================

/// Gameplay meaning of an event, derived from its type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Jump-table event; may mark the start of combo recovery
    RecoveryMarker,
    /// Attack-behavior event; may open a hitbox window
    Attack,
    /// Anything else
    Other,
}

impl EventKind {
    /// Maps a raw event type code to its kind.
    #[must_use]
    pub const fn from_type_code(type_code: i32) -> Self {
        match type_code {
            RECOVERY_MARKER_TYPE => Self::RecoveryMarker,
            ATTACK_TYPE => Self::Attack,
            _ => Self::Other,
        }
    }
}

/// One event on an animation timeline, parameters still encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Raw event type code
    #[serde(rename = "type")]
    pub type_code: i32,
    /// Start time in animation-local seconds
    #[serde(rename = "start")]
    pub start_time: f32,
    /// End time in animation-local seconds
    #[serde(rename = "end")]
    pub end_time: f32,
    /// Little-endian parameter block
    #[serde(default)]
    pub params: Vec<u8>,
}

impl TimelineEvent {
    /// Returns the event's kind.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        EventKind::from_type_code(self.type_code)
    }

    /// Returns `true` for attack and recovery-marker events.
    #[must_use]
    pub const fn carries_frame_data(&self) -> bool {
        !matches!(self.kind(), EventKind::Other)
    }
}

/// An animation and its events in authoring order (not time-sorted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationTimeline {
    /// Numeric animation id
    pub id: i64,
    /// Animation file name
    pub file_name: String,
    /// Events in authoring order
    #[serde(default)]
    pub events: Vec<TimelineEvent>,
}

/// A decoded timeline container.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineContainer {
    /// Container format version, used to select field templates
    pub version: u32,
    /// Animations in container order
    pub animations: Vec<AnimationTimeline>,
}

// ============================================================================
// Collaborator Traits
// ============================================================================

/// Read-only access to an archive of named entries.
pub trait ArchiveReader {
    /// Lists every entry name in a stable order.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be enumerated.
    fn entry_names(&self) -> std::io::Result<Vec<String>>;

    /// Reads the raw bytes of a named entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist or cannot be read.
    fn read_entry(&self, name: &str) -> std::io::Result<Vec<u8>>;
}

/// Turns archive entry bytes into animation timelines.
pub trait TimelineDecoder {
    /// Returns `true` if `bytes` is a container this decoder understands.
    fn is_container(&self, bytes: &[u8]) -> bool;

    /// Decodes a recognized container.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Container`] if the body is malformed.
    fn decode(&self, bytes: &[u8]) -> Result<TimelineContainer, DecodeError>;
}

/// Supplies parameter layouts for event types.
pub trait TemplateProvider {
    /// Returns the layout for `type_code` in a container of `version`.
    fn template(&self, version: u32, type_code: i32) -> Option<&FieldTemplate>;
}
