//! Report aggregation
//!
//! Groups analysis records by kind (outer) and weapon label (inner), then
//! applies the ordering and exclusion rules. Rendering lives in [`render`].

pub mod render;

pub use render::{ReportFormat, render};

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::Serialize;

use framedata_core::config::OuterOrder;

use crate::analysis::{AnalysisRecord, AttackInfo};

/// Weapon label that is never rendered.
pub const EXCLUDED_WEAPON_LABEL: &str = "IDK";

/// Weapon label prefixes that are never rendered.
pub const EXCLUDED_WEAPON_PREFIXES: [&str; 2] = ["NoAnim", "Unk"];

/// Returns `true` if groups with this weapon label are hidden from output.
#[must_use]
pub fn is_excluded_weapon_label(label: &str) -> bool {
    label == EXCLUDED_WEAPON_LABEL
        || EXCLUDED_WEAPON_PREFIXES
            .iter()
            .any(|prefix| label.starts_with(prefix))
}

// ============================================================================
// Options
// ============================================================================

/// Ordering of entries within a weapon group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryOrder {
    /// Lexicographic by animation file name
    #[default]
    FileName,
    /// By first attack start when both entries have attacks, otherwise by
    /// recovery start. Not selected anywhere; see DESIGN.md.
    FirstAttackStart,
}

impl EntryOrder {
    /// Compares two entries under this order.
    #[must_use]
    pub fn compare(self, a: &AttackInfo, b: &AttackInfo) -> Ordering {
        match self {
            Self::FileName => a.file_name.cmp(&b.file_name),
            Self::FirstAttackStart => match (a.attack_windows.first(), b.attack_windows.first()) {
                (Some(x), Some(y)) => x.start.total_cmp(&y.start),
                _ => a
                    .recovery_start_or_sentinel()
                    .total_cmp(&b.recovery_start_or_sentinel()),
            },
        }
    }
}

/// Presentation choices for [`build_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportOptions {
    /// Ordering of kind groups
    pub outer_order: OuterOrder,
    /// Ordering of entries within a weapon group
    pub entry_order: EntryOrder,
}

// ============================================================================
// Report Types
// ============================================================================

/// The grouped, ordered report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Kind groups in presentation order
    pub kinds: Vec<KindGroup>,
}

/// All weapons' entries for one animation kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindGroup {
    /// Kind label
    pub label: String,
    /// Weapon groups in presentation order, hidden ones included
    pub weapons: Vec<WeaponGroup>,
}

/// One weapon label's entries within a kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponGroup {
    /// Weapon label
    pub label: String,
    /// Excluded from rendering
    #[serde(skip)]
    pub hidden: bool,
    /// Entries in presentation order
    pub entries: Vec<AttackInfo>,
}

impl KindGroup {
    /// Weapon groups that are rendered.
    pub fn visible_weapons(&self) -> impl Iterator<Item = &WeaponGroup> {
        self.weapons.iter().filter(|group| !group.hidden)
    }
}

impl Report {
    /// Number of rendered entries.
    #[must_use]
    pub fn visible_entry_count(&self) -> usize {
        self.kinds
            .iter()
            .flat_map(|kind| kind.visible_weapons())
            .map(|group| group.entries.len())
            .sum()
    }

    /// Number of entries held back by the exclusion rule.
    #[must_use]
    pub fn hidden_entry_count(&self) -> usize {
        self.kinds
            .iter()
            .flat_map(|kind| kind.weapons.iter().filter(|group| group.hidden))
            .map(|group| group.entries.len())
            .sum()
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// Groups and orders analysis records.
///
/// - Kind groups keep first-occurrence order unless
///   [`OuterOrder::Alphabetical`] is requested.
/// - Weapon groups are stably sorted by the sentinel-encoded recovery start
///   of the first record that landed in them. Excluded labels are kept (and
///   ordered) but flagged hidden.
/// - Entries are stably sorted by `options.entry_order`.
#[must_use]
pub fn build_report(records: Vec<AnalysisRecord>, options: &ReportOptions) -> Report {
    let mut grouped: IndexMap<String, IndexMap<String, Vec<AttackInfo>>> = IndexMap::new();
    for record in records {
        grouped
            .entry(record.kind)
            .or_default()
            .entry(record.weapon)
            .or_default()
            .push(record.info);
    }

    let mut kinds: Vec<KindGroup> = grouped
        .into_iter()
        .map(|(label, weapons)| KindGroup {
            label,
            weapons: order_weapon_groups(weapons, options.entry_order),
        })
        .collect();

    if options.outer_order == OuterOrder::Alphabetical {
        kinds.sort_by(|a, b| a.label.cmp(&b.label));
    }

    Report { kinds }
}

fn order_weapon_groups(
    weapons: IndexMap<String, Vec<AttackInfo>>,
    entry_order: EntryOrder,
) -> Vec<WeaponGroup> {
    // Key comes from the first record in arrival order, before entries sort.
    let mut keyed: Vec<(f32, WeaponGroup)> = weapons
        .into_iter()
        .map(|(label, mut entries)| {
            let key = entries
                .first()
                .map_or(f32::NEG_INFINITY, AttackInfo::recovery_start_or_sentinel);
            entries.sort_by(|a, b| entry_order.compare(a, b));
            let group = WeaponGroup {
                hidden: is_excluded_weapon_label(&label),
                label,
                entries,
            };
            (key, group)
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| a.total_cmp(b));
    keyed.into_iter().map(|(_, group)| group).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AttackWindow;

    fn info(file: &str, recovery: Option<f32>, first_attack: Option<f32>) -> AttackInfo {
        AttackInfo {
            animation_id: 0,
            file_name: file.to_string(),
            detail: "d".to_string(),
            attack_windows: first_attack
                .map(|start| AttackWindow {
                    start,
                    end: start + 0.1,
                })
                .into_iter()
                .collect(),
            recovery_start: recovery,
        }
    }

    fn record(kind: &str, weapon: &str, info: AttackInfo) -> AnalysisRecord {
        AnalysisRecord {
            kind: kind.to_string(),
            weapon: weapon.to_string(),
            info,
        }
    }

    fn labels(group: &KindGroup) -> Vec<&str> {
        group.weapons.iter().map(|w| w.label.as_str()).collect()
    }

    #[test]
    fn test_excluded_labels() {
        assert!(is_excluded_weapon_label("IDK"));
        assert!(is_excluded_weapon_label("NoAnimShield"));
        assert!(is_excluded_weapon_label("Unknown"));
        assert!(!is_excluded_weapon_label("IDKnife"));
        assert!(!is_excluded_weapon_label("Sword"));
        assert!(!is_excluded_weapon_label("unk"));
    }

    #[test]
    fn test_outer_groups_keep_first_occurrence() {
        let report = build_report(
            vec![
                record("Roll", "Sword", info("a", None, None)),
                record("R1", "Sword", info("b", None, None)),
                record("Roll", "Axe", info("c", None, None)),
            ],
            &ReportOptions::default(),
        );
        let kinds: Vec<_> = report.kinds.iter().map(|k| k.label.as_str()).collect();
        assert_eq!(kinds, vec!["Roll", "R1"]);
    }

    #[test]
    fn test_outer_groups_alphabetical() {
        let options = ReportOptions {
            outer_order: OuterOrder::Alphabetical,
            ..ReportOptions::default()
        };
        let report = build_report(
            vec![
                record("Roll", "Sword", info("a", None, None)),
                record("R1", "Sword", info("b", None, None)),
            ],
            &options,
        );
        let kinds: Vec<_> = report.kinds.iter().map(|k| k.label.as_str()).collect();
        assert_eq!(kinds, vec!["R1", "Roll"]);
    }

    #[test]
    fn test_inner_groups_by_first_recovery_start() {
        let report = build_report(
            vec![
                record("R1", "Axe", info("a", Some(0.9), None)),
                record("R1", "Sword", info("b", Some(0.4), None)),
                record("R1", "Fist", info("c", None, None)),
                // Later Axe entry does not change Axe's key.
                record("R1", "Axe", info("0", Some(0.1), None)),
            ],
            &ReportOptions::default(),
        );
        assert_eq!(labels(&report.kinds[0]), vec!["Fist", "Sword", "Axe"]);
    }

    #[test]
    fn test_group_key_taken_before_entry_sort() {
        // "z" arrives first; sorting moves "a" to the front but the key stays 0.8.
        let report = build_report(
            vec![
                record("R1", "Axe", info("z", Some(0.8), None)),
                record("R1", "Axe", info("a", Some(0.1), None)),
                record("R1", "Sword", info("m", Some(0.5), None)),
            ],
            &ReportOptions::default(),
        );
        let group = &report.kinds[0];
        assert_eq!(labels(group), vec!["Sword", "Axe"]);
        let files: Vec<_> = group.weapons[1]
            .entries
            .iter()
            .map(|e| e.file_name.as_str())
            .collect();
        assert_eq!(files, vec!["a", "z"]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let report = build_report(
            vec![
                record("R1", "B", info("a", Some(0.5), None)),
                record("R1", "A", info("b", Some(0.5), None)),
            ],
            &ReportOptions::default(),
        );
        assert_eq!(labels(&report.kinds[0]), vec!["B", "A"]);
    }

    #[test]
    fn test_hidden_groups_still_ordered() {
        let report = build_report(
            vec![
                record("R1", "Sword", info("a", Some(0.7), None)),
                record("R1", "IDK", info("b", Some(0.2), None)),
                record("R1", "UnkStaff", info("c", Some(0.9), None)),
            ],
            &ReportOptions::default(),
        );
        let group = &report.kinds[0];
        assert_eq!(labels(group), vec!["IDK", "Sword", "UnkStaff"]);
        let visible: Vec<_> = group.visible_weapons().map(|w| w.label.as_str()).collect();
        assert_eq!(visible, vec!["Sword"]);
        assert_eq!(report.visible_entry_count(), 1);
        assert_eq!(report.hidden_entry_count(), 2);
    }

    #[test]
    fn test_entries_sorted_by_file_name() {
        let report = build_report(
            vec![
                record("R1", "Sword", info("a000_300020.hkt", Some(0.1), Some(0.0))),
                record("R1", "Sword", info("a000_300000.hkt", Some(0.9), Some(0.5))),
            ],
            &ReportOptions::default(),
        );
        let files: Vec<_> = report.kinds[0].weapons[0]
            .entries
            .iter()
            .map(|e| e.file_name.as_str())
            .collect();
        assert_eq!(files, vec!["a000_300000.hkt", "a000_300020.hkt"]);
    }

    #[test]
    fn test_first_attack_start_order() {
        let order = EntryOrder::FirstAttackStart;
        let early = info("z", Some(0.9), Some(0.1));
        let late = info("a", Some(0.2), Some(0.4));
        assert_eq!(order.compare(&early, &late), Ordering::Less);

        let no_attack = info("m", Some(0.3), None);
        assert_eq!(order.compare(&no_attack, &late), Ordering::Greater);
        assert_eq!(order.compare(&info("n", None, None), &no_attack), Ordering::Less);
    }
}
