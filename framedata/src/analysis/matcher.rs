//! Animation matcher
//!
//! Resolves which detail label (if any) an animation carries under one kind.

use crate::rules::CompiledKindRule;
use crate::timeline::AnimationTimeline;

/// Detail reported when no pattern matches.
pub const NOT_FOUND_DETAIL: &str = "not found";

/// Result of matching one animation against one kind rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome<'a> {
    /// Resolved detail label, or [`NOT_FOUND_DETAIL`]
    pub detail: &'a str,
    /// Whether any pattern matched; `false` excludes the animation
    pub found: bool,
}

impl MatchOutcome<'_> {
    const fn not_found() -> Self {
        Self {
            detail: NOT_FOUND_DETAIL,
            found: false,
        }
    }
}

/// Matches an animation's id against a kind rule.
///
/// The decimal form of the id is searched (unanchored) with each pattern in
/// resolution order; the first hit's label wins.
#[must_use]
pub fn match_animation<'a>(
    animation: &AnimationTimeline,
    rule: &'a CompiledKindRule,
) -> MatchOutcome<'a> {
    let id = animation.id.to_string();

    rule.patterns()
        .iter()
        .find(|(pattern, _)| pattern.is_match(&id))
        .map_or_else(MatchOutcome::not_found, |(_, label)| MatchOutcome {
            detail: label,
            found: true,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use framedata_core::config::AnimKindConfig;
    use indexmap::IndexMap;

    fn animation(id: i64) -> AnimationTimeline {
        AnimationTimeline {
            id,
            file_name: format!("a000_{id:06}.hkt"),
            events: Vec::new(),
        }
    }

    fn rule(pattern: Option<&str>, details: &[(&str, &str)]) -> CompiledKindRule {
        let details = (!details.is_empty()).then(|| {
            details
                .iter()
                .map(|(p, l)| ((*p).to_string(), (*l).to_string()))
                .collect::<IndexMap<_, _>>()
        });
        let config = AnimKindConfig::Rules {
            pattern: pattern.map(ToString::to_string),
            details,
        };
        CompiledKindRule::compile("R1", &config).unwrap()
    }

    #[test]
    fn test_primary_pattern_resolves_to_kind_label() {
        let rule = rule(Some("^3000\\d\\d$"), &[]);
        let outcome = match_animation(&animation(300_001), &rule);
        assert_eq!(
            outcome,
            MatchOutcome {
                detail: "R1",
                found: true
            }
        );
    }

    #[test]
    fn test_first_matching_detail_wins() {
        let rule = rule(
            Some("^3000"),
            &[("^30000\\d$", "Opener"), ("^300000$", "Exact")],
        );
        let outcome = match_animation(&animation(300_000), &rule);
        assert_eq!(outcome.detail, "Opener");
        assert!(outcome.found);
    }

    #[test]
    fn test_detail_checked_before_primary() {
        let rule = rule(Some("^3000"), &[("^300010$", "Third")]);
        assert_eq!(match_animation(&animation(300_010), &rule).detail, "Third");
        assert_eq!(match_animation(&animation(300_011), &rule).detail, "R1");
    }

    #[test]
    fn test_unanchored_search() {
        let rule = rule(Some("0001"), &[]);
        assert!(match_animation(&animation(300_012), &rule).found);
    }

    #[test]
    fn test_no_match_is_not_found() {
        let rule = rule(Some("^3000"), &[("^3001", "Other")]);
        let outcome = match_animation(&animation(400_000), &rule);
        assert!(!outcome.found);
        assert_eq!(outcome.detail, NOT_FOUND_DETAIL);
    }

    #[test]
    fn test_details_only_rule() {
        let rule = rule(None, &[("^3050", "Kick")]);
        assert_eq!(match_animation(&animation(305_000), &rule).detail, "Kick");
        assert!(!match_animation(&animation(300_000), &rule).found);
    }
}
