//! JSON timeline-dump container
//!
//! A container is a JSON document tagged with [`CONTAINER_FORMAT`]:
//!
//! ```json
//! {
//!   "format": "framedata-timeline",
//!   "version": 21,
//!   "animations": [
//!     {
//!       "id": 3000,
//!       "file_name": "a000_003000.hkt",
//!       "events": [{ "type": 1, "start": 0.2, "end": 0.5, "params": [0, 0, 0, 0, 0, 0, 0, 0] }]
//!     }
//!   ]
//! }
//! ```
//!
//! Anything without the tag (including non-JSON bytes) is not a container.

use serde::{Deserialize, Serialize};

use super::{AnimationTimeline, TimelineContainer, TimelineDecoder};
use crate::error::DecodeError;

/// Format tag identifying a timeline container.
pub const CONTAINER_FORMAT: &str = "framedata-timeline";

#[derive(Deserialize)]
struct ContainerHeader {
    format: String,
}

#[derive(Serialize, Deserialize)]
struct ContainerDocument {
    format: String,
    version: u32,
    #[serde(default)]
    animations: Vec<AnimationTimeline>,
}

/// Decoder for JSON timeline dumps.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTimelineDecoder;

impl JsonTimelineDecoder {
    /// Encodes a container in the format this decoder reads.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode(container: &TimelineContainer) -> Result<Vec<u8>, serde_json::Error> {
        let document = ContainerDocument {
            format: CONTAINER_FORMAT.to_string(),
            version: container.version,
            animations: container.animations.clone(),
        };
        serde_json::to_vec_pretty(&document)
    }
}

impl TimelineDecoder for JsonTimelineDecoder {
    fn is_container(&self, bytes: &[u8]) -> bool {
        serde_json::from_slice::<ContainerHeader>(bytes)
            .is_ok_and(|header| header.format == CONTAINER_FORMAT)
    }

    fn decode(&self, bytes: &[u8]) -> Result<TimelineContainer, DecodeError> {
        let document: ContainerDocument =
            serde_json::from_slice(bytes).map_err(|e| DecodeError::Container(e.to_string()))?;

        if document.format != CONTAINER_FORMAT {
            return Err(DecodeError::Container(format!(
                "unexpected format tag '{}'",
                document.format
            )));
        }

        Ok(TimelineContainer {
            version: document.version,
            animations: document.animations,
        })
    }
}
