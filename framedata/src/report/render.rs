//! Report rendering
//!
//! Every format skips hidden weapon groups, sorts each entry's attack windows
//! by start, and writes a missing recovery start as `-1`.

use std::borrow::Cow;
use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;

use crate::analysis::{AttackInfo, AttackWindow};
use crate::error::Result;

use super::{KindGroup, Report, WeaponGroup};

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Comma-separated, one level of leading commas per nesting level.
    #[default]
    Csv,
    /// Space-separated, two spaces of indent per nesting level.
    Text,
    /// Pretty-printed JSON document.
    Json,
}

/// Writes `report` to `out` in the requested format.
///
/// # Errors
///
/// Returns an error if writing or JSON serialization fails.
pub fn render<W: Write>(report: &Report, format: ReportFormat, out: &mut W) -> Result<()> {
    match format {
        ReportFormat::Csv => render_delimited(report, out, &CSV),
        ReportFormat::Text => render_delimited(report, out, &TEXT),
        ReportFormat::Json => render_json(report, out),
    }
}

// ============================================================================
// Delimited Formats
// ============================================================================

struct Layout {
    indent: &'static str,
    separator: &'static str,
    quote: fn(&str) -> Cow<'_, str>,
}

const CSV: Layout = Layout {
    indent: ",",
    separator: ",",
    quote: quote_csv,
};

const TEXT: Layout = Layout {
    indent: "  ",
    separator: " ",
    quote: verbatim,
};

fn render_delimited<W: Write>(report: &Report, out: &mut W, layout: &Layout) -> Result<()> {
    for kind in &report.kinds {
        writeln!(out, "{}", (layout.quote)(&kind.label))?;
        for weapon in kind.visible_weapons() {
            writeln!(out, "{}{}", layout.indent, (layout.quote)(&weapon.label))?;
            for entry in &weapon.entries {
                let line = entry_fields(entry, layout.quote).join(layout.separator);
                writeln!(out, "{0}{0}{line}", layout.indent)?;
            }
        }
    }
    Ok(())
}

/// Fields of one entry line: id, file, detail, each window's start and end,
/// then recovery start.
fn entry_fields(entry: &AttackInfo, quote: fn(&str) -> Cow<'_, str>) -> Vec<String> {
    let mut fields = vec![
        entry.animation_id.to_string(),
        quote(&entry.file_name).into_owned(),
        quote(&entry.detail).into_owned(),
    ];
    for window in entry.windows_by_start() {
        fields.push(window.start.to_string());
        fields.push(window.end.to_string());
    }
    fields.push(entry.recovery_start_or_sentinel().to_string());
    fields
}

fn verbatim(field: &str) -> Cow<'_, str> {
    Cow::Borrowed(field)
}

fn quote_csv(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

// ============================================================================
// JSON
// ============================================================================

#[derive(Serialize)]
struct JsonKind<'a> {
    kind: &'a str,
    weapons: Vec<JsonWeapon<'a>>,
}

#[derive(Serialize)]
struct JsonWeapon<'a> {
    weapon: &'a str,
    entries: Vec<JsonEntry<'a>>,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    animation_id: i64,
    file_name: &'a str,
    detail: &'a str,
    attack_windows: Vec<AttackWindow>,
    recovery_start: f32,
}

impl<'a> From<&'a KindGroup> for JsonKind<'a> {
    fn from(kind: &'a KindGroup) -> Self {
        Self {
            kind: &kind.label,
            weapons: kind.visible_weapons().map(JsonWeapon::from).collect(),
        }
    }
}

impl<'a> From<&'a WeaponGroup> for JsonWeapon<'a> {
    fn from(weapon: &'a WeaponGroup) -> Self {
        Self {
            weapon: &weapon.label,
            entries: weapon
                .entries
                .iter()
                .map(|entry| JsonEntry {
                    animation_id: entry.animation_id,
                    file_name: &entry.file_name,
                    detail: &entry.detail,
                    attack_windows: entry.windows_by_start(),
                    recovery_start: entry.recovery_start_or_sentinel(),
                })
                .collect(),
        }
    }
}

fn render_json<W: Write>(report: &Report, out: &mut W) -> Result<()> {
    let view: Vec<JsonKind<'_>> = report.kinds.iter().map(JsonKind::from).collect();
    serde_json::to_writer_pretty(&mut *out, &view)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisRecord;
    use crate::report::{ReportOptions, build_report};

    fn entry(id: i64, windows: &[(f32, f32)], recovery: Option<f32>) -> AttackInfo {
        AttackInfo {
            animation_id: id,
            file_name: format!("a000_{id:06}.hkt"),
            detail: "R1".to_string(),
            attack_windows: windows
                .iter()
                .map(|&(start, end)| AttackWindow { start, end })
                .collect(),
            recovery_start: recovery,
        }
    }

    fn report(records: Vec<(&str, &str, AttackInfo)>) -> Report {
        build_report(
            records
                .into_iter()
                .map(|(kind, weapon, info)| AnalysisRecord {
                    kind: kind.to_string(),
                    weapon: weapon.to_string(),
                    info,
                })
                .collect(),
            &ReportOptions::default(),
        )
    }

    fn rendered(report: &Report, format: ReportFormat) -> String {
        let mut out = Vec::new();
        render(report, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_csv_layout() {
        let report = report(vec![(
            "R1",
            "Sword",
            entry(300_000, &[(0.2, 0.5)], Some(0.6)),
        )]);
        assert_eq!(
            rendered(&report, ReportFormat::Csv),
            "R1\n,Sword\n,,300000,a000_300000.hkt,R1,0.2,0.5,0.6\n"
        );
    }

    #[test]
    fn test_windows_sorted_and_sentinel_rendered() {
        let report = report(vec![(
            "R1",
            "Sword",
            entry(300_000, &[(0.8, 0.9), (0.1, 0.3)], None),
        )]);
        assert_eq!(
            rendered(&report, ReportFormat::Csv),
            "R1\n,Sword\n,,300000,a000_300000.hkt,R1,0.1,0.3,0.8,0.9,-1\n"
        );
    }

    #[test]
    fn test_text_layout() {
        let report = report(vec![("R1", "Sword", entry(300_000, &[], None))]);
        assert_eq!(
            rendered(&report, ReportFormat::Text),
            "R1\n  Sword\n    300000 a000_300000.hkt R1 -1\n"
        );
    }

    #[test]
    fn test_hidden_groups_never_rendered() {
        let report = report(vec![
            ("R1", "IDK", entry(1, &[], Some(0.1))),
            ("R1", "NoAnimShield", entry(2, &[], Some(0.2))),
            ("R1", "UnkStaff", entry(3, &[], Some(0.3))),
            ("R1", "Sword", entry(4, &[], Some(0.4))),
        ]);
        for format in [ReportFormat::Csv, ReportFormat::Text, ReportFormat::Json] {
            let out = rendered(&report, format);
            assert!(out.contains("Sword"));
            for hidden in ["IDK", "NoAnim", "Unk"] {
                assert!(!out.contains(hidden), "{format:?} leaked {hidden}: {out}");
            }
        }
    }

    #[test]
    fn test_csv_quotes_delimiters() {
        assert_eq!(quote_csv("plain"), "plain");
        assert_eq!(quote_csv("a,b"), "\"a,b\"");
        assert_eq!(quote_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_json_view() {
        let report = report(vec![(
            "R1",
            "Sword",
            entry(300_000, &[(0.5, 0.6), (0.2, 0.3)], None),
        )]);
        let value: serde_json::Value =
            serde_json::from_str(&rendered(&report, ReportFormat::Json)).unwrap();
        let entry = &value[0]["weapons"][0]["entries"][0];
        assert_eq!(value[0]["kind"], "R1");
        assert_eq!(value[0]["weapons"][0]["weapon"], "Sword");
        assert_eq!(entry["animation_id"], 300_000);
        assert_eq!(entry["recovery_start"], -1.0);
        let starts: Vec<_> = entry["attack_windows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|w| w["start"].as_f64().unwrap())
            .collect();
        assert!(starts[0] < starts[1]);
    }

    #[test]
    fn test_empty_report_renders_nothing() {
        let report = Report { kinds: Vec::new() };
        assert_eq!(rendered(&report, ReportFormat::Csv), "");
        assert_eq!(rendered(&report, ReportFormat::Json).trim(), "[]");
    }
}
