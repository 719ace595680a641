//! Frame-data analysis
//!
//! Four pure stages, each testable on its own:
//!
//! 1. [`match_animation`]: resolve an animation's detail label under a kind
//! 2. [`EventClassifier::classify`]: decode and classify one event
//! 3. [`build_attack_info`]: fold an animation's events into [`AttackInfo`]
//! 4. [`Analyzer`]: drive the stages over every configured weapon

pub mod attack_info;
pub mod classify;
pub mod matcher;
pub mod pipeline;

pub use attack_info::{AttackInfo, AttackWindow, RECOVERY_SENTINEL, build_attack_info};
pub use classify::{COMBO_RECOVERY_JUMP_TABLE_IDS, ClassifiedEvent, EventClassifier};
pub use matcher::{MatchOutcome, NOT_FOUND_DETAIL, match_animation};
pub use pipeline::{AnalysisRecord, Analyzer, analyze_container};
