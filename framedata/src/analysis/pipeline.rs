//! Pipeline driver
//!
//! Looks up each configured weapon in the archive, decodes its timeline
//! container, and streams every `(kind, animation)` pair through
//! match → classify → fold. Only the caller materializes the records.

use tracing::{debug, info, trace, warn};

use framedata_core::config::WeaponEntry;

use crate::error::{DecodeError, Result};
use crate::rules::RuleSet;
use crate::timeline::{ArchiveReader, TimelineContainer, TimelineDecoder, locate_timeline_entry};

use super::attack_info::{AttackInfo, build_attack_info};
use super::classify::EventClassifier;
use super::matcher::match_animation;

/// One analyzed animation tagged with its grouping keys.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRecord {
    /// Animation-kind label (outer group)
    pub kind: String,
    /// Weapon label (inner group)
    pub weapon: String,
    /// Frame data for the animation
    pub info: AttackInfo,
}

/// Runs the analysis over an archive.
#[derive(Debug)]
pub struct Analyzer<'a, A: ?Sized, D: ?Sized> {
    rules: &'a RuleSet,
    archive: &'a A,
    decoder: &'a D,
}

impl<'a, A, D> Analyzer<'a, A, D>
where
    A: ArchiveReader + ?Sized,
    D: TimelineDecoder + ?Sized,
{
    /// Creates an analyzer over borrowed collaborators.
    #[must_use]
    pub const fn new(rules: &'a RuleSet, archive: &'a A, decoder: &'a D) -> Self {
        Self {
            rules,
            archive,
            decoder,
        }
    }

    /// Analyzes every configured weapon, in configured order.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be listed or read, if a weapon
    /// id does not resolve to exactly one entry, or if a recognized container
    /// or event fails to decode. A weapon whose entry is not a timeline
    /// container is skipped.
    pub fn run(&self) -> Result<Vec<AnalysisRecord>> {
        let names = self.archive.entry_names()?;
        let mut records = Vec::new();

        for weapon in self.rules.weapons() {
            let Some(container) = self.load_weapon(&names, weapon)? else {
                continue;
            };

            let before = records.len();
            for record in analyze_container(self.rules, weapon, &container) {
                records.push(record?);
            }
            debug!(
                weapon = %weapon.label,
                animations = container.animations.len(),
                matched = records.len() - before,
                "weapon analyzed"
            );
        }

        info!(records = records.len(), "analysis complete");
        Ok(records)
    }

    fn load_weapon(
        &self,
        names: &[String],
        weapon: &WeaponEntry,
    ) -> Result<Option<TimelineContainer>> {
        let entry = locate_timeline_entry(names, &weapon.id)?;
        info!(weapon = %weapon.label, id = %weapon.id, entry = %entry, "weapon located");

        let bytes = self.archive.read_entry(&entry)?;
        if !self.decoder.is_container(&bytes) {
            warn!(
                weapon = %weapon.label,
                entry = %entry,
                "entry is not a timeline container, skipping weapon"
            );
            return Ok(None);
        }

        Ok(Some(self.decoder.decode(&bytes)?))
    }
}

/// Streams the records one decoded weapon contributes.
///
/// Kinds are visited in configured order and, within a kind, animations in
/// container order. Animations that match no pattern of a kind, or carry no
/// attack or recovery-marker event, are dropped.
pub fn analyze_container<'a>(
    rules: &'a RuleSet,
    weapon: &'a WeaponEntry,
    container: &'a TimelineContainer,
) -> impl Iterator<Item = std::result::Result<AnalysisRecord, DecodeError>> + 'a {
    let classifier = EventClassifier::new(rules.templates(), container.version);

    rules.kinds().iter().flat_map(move |rule| {
        container.animations.iter().filter_map(move |animation| {
            let outcome = match_animation(animation, rule);
            if !outcome.found {
                trace!(kind = rule.label(), animation = animation.id, "no pattern matched");
                return None;
            }

            match build_attack_info(animation, outcome.detail, &classifier) {
                Ok(Some(info)) => Some(Ok(AnalysisRecord {
                    kind: rule.label().to_string(),
                    weapon: weapon.label.clone(),
                    info,
                })),
                Ok(None) => {
                    trace!(
                        kind = rule.label(),
                        animation = animation.id,
                        "no frame-data events, dropped"
                    );
                    None
                }
                Err(e) => Some(Err(e)),
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FrameDataError, LookupError};
    use crate::timeline::{
        ATTACK_TYPE, AnimationTimeline, JsonTimelineDecoder, RECOVERY_MARKER_TYPE, TimelineEvent,
    };
    use framedata_core::config::AnalyzerConfig;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct MemoryArchive(BTreeMap<String, Vec<u8>>);

    impl MemoryArchive {
        fn with(mut self, name: &str, bytes: Vec<u8>) -> Self {
            self.0.insert(name.to_string(), bytes);
            self
        }
    }

    impl ArchiveReader for MemoryArchive {
        fn entry_names(&self) -> std::io::Result<Vec<String>> {
            Ok(self.0.keys().cloned().collect())
        }

        fn read_entry(&self, name: &str) -> std::io::Result<Vec<u8>> {
            self.0
                .get(name)
                .cloned()
                .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))
        }
    }

    fn attack(start: f32, end: f32) -> TimelineEvent {
        TimelineEvent {
            type_code: ATTACK_TYPE,
            start_time: start,
            end_time: end,
            params: vec![0; 8],
        }
    }

    fn marker(start: f32, id: i32) -> TimelineEvent {
        TimelineEvent {
            type_code: RECOVERY_MARKER_TYPE,
            start_time: start,
            end_time: start + 0.1,
            params: id.to_le_bytes().to_vec(),
        }
    }

    fn animation(id: i64, events: Vec<TimelineEvent>) -> AnimationTimeline {
        AnimationTimeline {
            id,
            file_name: format!("a000_{id:06}.hkt"),
            events,
        }
    }

    fn container(animations: Vec<AnimationTimeline>) -> Vec<u8> {
        JsonTimelineDecoder::encode(&TimelineContainer {
            version: 21,
            animations,
        })
        .unwrap()
    }

    fn rules(yaml: &str) -> RuleSet {
        let config: AnalyzerConfig = serde_yaml::from_str(yaml).unwrap();
        RuleSet::compile(&config).unwrap()
    }

    const RULES: &str = r#"
weapons:
  "001": Sword
anim_kinds:
  R1: "^3000"
  Roll: "^7"
"#;

    #[test]
    fn test_records_follow_kind_then_animation_order() {
        let rules = rules(RULES);
        let archive = MemoryArchive::default().with(
            "chr/a001.tae",
            container(vec![
                animation(300_001, vec![attack(0.2, 0.5), marker(0.6, 4)]),
                animation(700_000, vec![attack(0.1, 0.2)]),
                animation(300_000, vec![marker(0.4, 116)]),
            ]),
        );

        let records = Analyzer::new(&rules, &archive, &JsonTimelineDecoder)
            .run()
            .unwrap();
        let keys: Vec<_> = records
            .iter()
            .map(|r| (r.kind.as_str(), r.info.animation_id))
            .collect();
        assert_eq!(
            keys,
            vec![("R1", 300_001), ("R1", 300_000), ("Roll", 700_000)]
        );
        assert!(records.iter().all(|r| r.weapon == "Sword"));
        assert_eq!(records[0].info.recovery_start, Some(0.6));
    }

    #[test]
    fn test_unmatched_and_eventless_animations_dropped() {
        let rules = rules(RULES);
        let archive = MemoryArchive::default().with(
            "a001.tae",
            container(vec![
                animation(500_000, vec![attack(0.2, 0.5)]),
                animation(300_002, Vec::new()),
            ]),
        );

        let records = Analyzer::new(&rules, &archive, &JsonTimelineDecoder)
            .run()
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_non_container_weapon_skipped() {
        let rules = rules(
            r#"
weapons:
  "001": Sword
  "002": Axe
anim_kinds:
  R1: "^3000"
"#,
        );
        let archive = MemoryArchive::default()
            .with("a001.tae", b"TAE \x00\x01".to_vec())
            .with(
                "a002.tae",
                container(vec![animation(300_000, vec![attack(0.1, 0.3)])]),
            );

        let records = Analyzer::new(&rules, &archive, &JsonTimelineDecoder)
            .run()
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].weapon, "Axe");
    }

    #[test]
    fn test_missing_weapon_is_fatal() {
        let rules = rules(RULES);
        let archive = MemoryArchive::default().with("a002.tae", container(Vec::new()));

        let err = Analyzer::new(&rules, &archive, &JsonTimelineDecoder)
            .run()
            .unwrap_err();
        assert!(matches!(
            err,
            FrameDataError::Lookup(LookupError::NotFound { .. })
        ));
        assert_eq!(err.exit_code(), crate::error::ExitCode::LOOKUP_ERROR);
    }

    #[test]
    fn test_ambiguous_weapon_is_fatal() {
        let rules = rules(RULES);
        let archive = MemoryArchive::default()
            .with("one/a001.tae", container(Vec::new()))
            .with("two/a001.tae", container(Vec::new()));

        let err = Analyzer::new(&rules, &archive, &JsonTimelineDecoder)
            .run()
            .unwrap_err();
        assert!(matches!(
            err,
            FrameDataError::Lookup(LookupError::Ambiguous { .. })
        ));
    }

    #[test]
    fn test_decode_failure_is_fatal() {
        let rules = rules(RULES);
        let mut broken = attack(0.2, 0.5);
        broken.params.truncate(2);
        let archive = MemoryArchive::default().with(
            "a001.tae",
            container(vec![animation(300_000, vec![broken])]),
        );

        let err = Analyzer::new(&rules, &archive, &JsonTimelineDecoder)
            .run()
            .unwrap_err();
        assert_eq!(err.exit_code(), crate::error::ExitCode::DECODE_ERROR);
    }

    #[test]
    fn test_same_animation_matches_multiple_kinds() {
        let rules = rules(
            r#"
weapons:
  "001": Sword
anim_kinds:
  Light: "^3000"
  Any: "0"
"#,
        );
        let weapon = &rules.weapons()[0];
        let decoded = TimelineContainer {
            version: 21,
            animations: vec![animation(300_000, vec![attack(0.1, 0.2)])],
        };

        let kinds: Vec<_> = analyze_container(&rules, weapon, &decoded)
            .map(|r| r.unwrap().kind)
            .collect();
        assert_eq!(kinds, vec!["Light", "Any"]);
    }
}
