//! `framedata` - frame-data extraction for combat animation timelines
//!
//! Reads each configured weapon's animation timelines out of an archive,
//! classifies animations by id pattern, folds their hitbox and recovery
//! events into per-animation frame data, and renders a grouped report.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod report;
pub mod rules;
pub mod timeline;
