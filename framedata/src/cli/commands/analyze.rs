//! `analyze` command
//!
//! Loads the rule file, runs the pipeline over a directory archive and writes
//! the report to a file or stdout.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::analysis::Analyzer;
use crate::cli::args::AnalyzeArgs;
use crate::config::ConfigLoader;
use crate::error::FrameDataError;
use crate::report::{ReportOptions, build_report, render};
use crate::timeline::{DirectoryArchive, JsonTimelineDecoder};

/// Run the analysis and write the report.
///
/// # Errors
///
/// Returns an error if the rule file is invalid, the archive cannot be read,
/// a weapon lookup fails, decoding fails, or the report cannot be written.
pub fn run(args: &AnalyzeArgs) -> Result<(), FrameDataError> {
    tracing::info!(config = %args.config.display(), "loading rule file");
    let load_result = ConfigLoader::with_defaults().load(&args.config)?;
    for warning in &load_result.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }
    let rules = load_result.rules;

    let archive = DirectoryArchive::open(args.archive.clone())?;
    tracing::info!(archive = %archive.root().display(), "archive opened");

    let records = Analyzer::new(&rules, &archive, &JsonTimelineDecoder).run()?;

    let options = ReportOptions {
        outer_order: args.outer_order.unwrap_or_else(|| rules.outer_order()),
        ..ReportOptions::default()
    };
    let report = build_report(records, &options);
    tracing::info!(
        kinds = report.kinds.len(),
        entries = report.visible_entry_count(),
        hidden = report.hidden_entry_count(),
        "report built"
    );

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };
    render(&report, args.format, &mut out)?;
    out.flush()?;

    if let Some(path) = &args.output {
        tracing::info!(output = %path.display(), "report written");
    }
    Ok(())
}
