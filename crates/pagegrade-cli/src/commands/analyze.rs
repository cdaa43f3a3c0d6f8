use crate::OutputFormat;
use crate::commands::{prompt, render};
use anyhow::{Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use pagegrade_browser::{CollectorConfig, PageSource, collect_page};
use pagegrade_core::analysis::{Analyzer, PageAnalyzer};
use pagegrade_core::snapshot::SnapshotWriter;
use std::path::PathBuf;
use std::time::Duration;

/// Options for the `analyze` subcommand
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub url: Option<String>,
    pub html: Option<String>,
    pub html_file: Option<PathBuf>,
    pub chrome_path: Option<PathBuf>,
    pub headful: bool,
    pub no_sandbox: bool,
    pub settle_ms: u64,
    pub timeout_secs: u64,
    pub save_snapshot: Option<PathBuf>,
}

impl AnalyzeOptions {
    /// The page source given on the command line, if any
    pub fn source(&self) -> Result<Option<PageSource>> {
        if let Some(url) = &self.url {
            if url.trim().is_empty() {
                return Err(anyhow!("--url must not be empty"));
            }
            return Ok(Some(PageSource::url(url)));
        }
        if let Some(html) = &self.html {
            if html.trim().is_empty() {
                return Err(anyhow!("--html must not be empty"));
            }
            return Ok(Some(PageSource::html(html.clone())));
        }
        if let Some(path) = &self.html_file {
            return Ok(Some(PageSource::html_file(path)?));
        }
        Ok(None)
    }

    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig::default()
            .with_chrome_path(self.chrome_path.clone())
            .with_headless(!self.headful)
            .with_no_sandbox(self.no_sandbox)
            .with_settle(Duration::from_millis(self.settle_ms))
            .with_navigation_timeout(Duration::from_secs(self.timeout_secs))
    }
}

pub fn execute(options: AnalyzeOptions, format: OutputFormat) -> Result<()> {
    let source = match options.source()? {
        Some(source) => source,
        None => prompt::ask_source()?,
    };
    let config = options.collector_config();

    tracing::info!("Analyzing {}", source.describe());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let spinner = spinner("Analyzing...")?;

    let collected = runtime.block_on(async {
        tokio::select! {
            snapshot = collect_page(config, &source) => snapshot.map_err(anyhow::Error::from),
            _ = tokio::signal::ctrl_c() => Err(anyhow!("Interrupted")),
        }
    });

    // Do not hang on a Chrome process that ignores shutdown
    runtime.shutdown_timeout(Duration::from_millis(100));

    let analyzed = collected.and_then(|snapshot| {
        let report = PageAnalyzer.analyze(&snapshot)?;
        Ok((snapshot, report))
    });

    let (snapshot, report) = match analyzed {
        Ok(result) => {
            spinner.finish_with_message("Analysis complete!");
            result
        }
        Err(e) => {
            spinner.abandon_with_message("Analysis failed!");
            return Err(e);
        }
    };

    if let Some(path) = &options.save_snapshot {
        SnapshotWriter::to_file(&snapshot, path)?;
        tracing::info!("Snapshot written to {}", path.display());
    }

    render::print(&report, snapshot.url.as_deref(), format)
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}
