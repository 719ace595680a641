//! Attack-info builder
//!
//! Folds one animation's classified events into a single [`AttackInfo`].

use serde::Serialize;

use crate::error::DecodeError;
use crate::timeline::{AnimationTimeline, TemplateProvider};

use super::classify::{ClassifiedEvent, EventClassifier};

/// Recovery start reported when no combo-recovery marker was found.
pub const RECOVERY_SENTINEL: f32 = -1.0;

/// A time interval during which a hit can register.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttackWindow {
    /// Window start, animation-local seconds
    pub start: f32,
    /// Window end, animation-local seconds
    pub end: f32,
}

/// Frame data for one matched animation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttackInfo {
    /// Animation id
    pub animation_id: i64,
    /// Animation file name
    pub file_name: String,
    /// Resolved detail label
    pub detail: String,
    /// Hitbox windows in event order
    pub attack_windows: Vec<AttackWindow>,
    /// Start of combo recovery, if a marker was found
    pub recovery_start: Option<f32>,
}

impl AttackInfo {
    /// Recovery start with absence encoded as [`RECOVERY_SENTINEL`].
    #[must_use]
    pub fn recovery_start_or_sentinel(&self) -> f32 {
        self.recovery_start.unwrap_or(RECOVERY_SENTINEL)
    }

    /// Attack windows sorted ascending by start.
    #[must_use]
    pub fn windows_by_start(&self) -> Vec<AttackWindow> {
        let mut windows = self.attack_windows.clone();
        windows.sort_by(|a, b| a.start.total_cmp(&b.start));
        windows
    }
}

/// Accumulator for a single animation's fold.
#[derive(Debug, Default)]
struct FrameDataFold {
    attack_windows: Vec<AttackWindow>,
    recovery_start: Option<f32>,
}

impl FrameDataFold {
    fn step(mut self, event: ClassifiedEvent) -> Self {
        match event {
            ClassifiedEvent::Attack(window) => self.attack_windows.push(window),
            ClassifiedEvent::RecoveryStart(time) => self.recovery_start = Some(time),
            ClassifiedEvent::Ignored => {}
        }
        self
    }
}

/// Builds the frame data for a matched animation.
///
/// Returns `Ok(None)` when the timeline has no attack or recovery-marker
/// events at all. Otherwise every such event is classified in timeline order:
/// hitbox windows accumulate, and each qualifying recovery marker overwrites
/// the previous one.
///
/// # Errors
///
/// Returns an error if a recognized event cannot be decoded.
pub fn build_attack_info<T: TemplateProvider + ?Sized>(
    animation: &AnimationTimeline,
    detail: &str,
    classifier: &EventClassifier<'_, T>,
) -> Result<Option<AttackInfo>, DecodeError> {
    let mut relevant = animation
        .events
        .iter()
        .filter(|event| event.carries_frame_data())
        .peekable();

    if relevant.peek().is_none() {
        return Ok(None);
    }

    let fold = relevant.try_fold(FrameDataFold::default(), |fold, event| {
        classifier.classify(event).map(|classified| fold.step(classified))
    })?;

    Ok(Some(AttackInfo {
        animation_id: animation.id,
        file_name: animation.file_name.clone(),
        detail: detail.to_string(),
        attack_windows: fold.attack_windows,
        recovery_start: fold.recovery_start,
    }))
}
