//! `validate` command
//!
//! Checks rule files without touching an archive.

use std::path::Path;

use serde::Serialize;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::{ConfigLoader, LoadWarning};
use crate::error::{ConfigError, FrameDataError, ValidationIssue};

/// Outcome for one file, as printed in JSON mode.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    valid: bool,
    errors: Vec<IssueReport>,
    warnings: Vec<IssueReport>,
}

#[derive(Debug, Serialize)]
struct IssueReport {
    location: String,
    message: String,
}

impl From<&ValidationIssue> for IssueReport {
    fn from(issue: &ValidationIssue) -> Self {
        Self {
            location: issue.path.clone(),
            message: issue.message.clone(),
        }
    }
}

impl From<&LoadWarning> for IssueReport {
    fn from(warning: &LoadWarning) -> Self {
        Self {
            location: warning.location.clone().unwrap_or_default(),
            message: warning.message.clone(),
        }
    }
}

/// Validate every file and report the outcome.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationFailed`] if any file has errors (or
/// warnings, with `--strict`).
pub fn run(args: &ValidateArgs) -> Result<(), FrameDataError> {
    let loader = ConfigLoader::with_defaults();
    let reports: Vec<FileReport> = args
        .files
        .iter()
        .map(|path| check_file(&loader, path, args.strict))
        .collect();

    match args.format {
        OutputFormat::Human => print_human(&reports),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    let failed = reports.iter().filter(|r| !r.valid).count();
    if failed > 0 {
        return Err(ConfigError::ValidationFailed { count: failed }.into());
    }
    Ok(())
}

fn check_file(loader: &ConfigLoader, path: &Path, strict: bool) -> FileReport {
    tracing::info!(file = %path.display(), "validating rule file");
    let file = path.display().to_string();

    match loader.load(path) {
        Ok(result) => {
            let warnings: Vec<IssueReport> = result.warnings.iter().map(Into::into).collect();
            FileReport {
                valid: !strict || warnings.is_empty(),
                file,
                errors: Vec::new(),
                warnings,
            }
        }
        Err(ConfigError::ValidationError { errors, .. }) => FileReport {
            file,
            valid: false,
            errors: errors.iter().map(Into::into).collect(),
            warnings: Vec::new(),
        },
        Err(e) => FileReport {
            file,
            valid: false,
            errors: vec![IssueReport {
                location: String::new(),
                message: e.to_string(),
            }],
            warnings: Vec::new(),
        },
    }
}

fn print_human(reports: &[FileReport]) {
    for report in reports {
        let status = if report.valid { "ok" } else { "FAILED" };
        println!("{}: {status}", report.file);
        for (label, issues) in [("error", &report.errors), ("warning", &report.warnings)] {
            for issue in issues {
                if issue.location.is_empty() {
                    println!("  {label}: {}", issue.message);
                } else {
                    println!("  {label}: {} at {}", issue.message, issue.location);
                }
            }
        }
    }
}
