use crate::OutputFormat;
use crate::commands::render;
use anyhow::Result;
use pagegrade_core::analysis::{Analyzer, PageAnalyzer};
use pagegrade_core::snapshot::{PageSnapshot, SnapshotReader};
use pagegrade_core::AnalysisReport;
use std::path::Path;

/// Read a saved snapshot and analyze it
pub fn load_and_analyze(file: &Path) -> Result<(PageSnapshot, AnalysisReport)> {
    tracing::debug!("Reading snapshot file: {}", file.display());

    let snapshot = SnapshotReader::from_file(file)?;
    SnapshotReader::validate(&snapshot)?;

    let report = PageAnalyzer.analyze(&snapshot)?;

    Ok((snapshot, report))
}

pub fn execute(file: &Path, format: OutputFormat) -> Result<()> {
    tracing::info!("Grading snapshot: {}", file.display());

    let (snapshot, report) = load_and_analyze(file)?;

    render::print(&report, snapshot.url.as_deref(), format)
}
