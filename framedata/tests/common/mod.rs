//! Shared integration-test harness for running the `framedata` binary.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Environment variables the binary reads; cleared so the host cannot leak in.
const FRAMEDATA_ENV: [&str; 6] = [
    "FRAMEDATA_CONFIG",
    "FRAMEDATA_ARCHIVE",
    "FRAMEDATA_COLOR",
    "FRAMEDATA_LOG_FORMAT",
    "FRAMEDATA_LOG_LEVEL",
    "FRAMEDATA_MAX_CONFIG_SIZE",
];

/// Runs the binary to completion and captures its output.
#[allow(clippy::missing_panics_doc)]
pub fn spawn_command(args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_framedata"));
    for var in FRAMEDATA_ENV {
        command.env_remove(var);
    }
    command
        .args(args)
        .output()
        .expect("failed to run framedata")
}

/// Runs `analyze` with the given rule file and archive plus extra flags.
#[allow(clippy::missing_panics_doc)]
pub fn analyze(config: &Path, archive: &Path, extra: &[&str]) -> Output {
    let mut args = vec![
        "analyze",
        "--config",
        config.to_str().expect("non-UTF-8 config path"),
        "--archive",
        archive.to_str().expect("non-UTF-8 archive path"),
    ];
    args.extend_from_slice(extra);
    spawn_command(&args)
}

/// Returns the path to a test fixture.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Writes a timeline container holding the given animations JSON array.
#[allow(clippy::missing_panics_doc)]
pub fn write_container(path: &Path, animations: &serde_json::Value) {
    let document = serde_json::json!({
        "format": "framedata-timeline",
        "version": 21,
        "animations": animations,
    });
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create archive directory");
    }
    std::fs::write(path, serde_json::to_vec_pretty(&document).unwrap())
        .expect("failed to write container");
}

/// An attack event; `variant` 0 is a real hitbox.
#[must_use]
pub fn attack(start: f32, end: f32, variant: u8) -> serde_json::Value {
    serde_json::json!({
        "type": 1, "start": start, "end": end,
        "params": [0, 0, 0, 0, variant, 0, 0, 0],
    })
}

/// A jump-table event with the given id.
#[must_use]
pub fn marker(start: f32, jump_table_id: u8) -> serde_json::Value {
    serde_json::json!({
        "type": 0, "start": start, "end": start + 0.1,
        "params": [jump_table_id, 0, 0, 0],
    })
}
