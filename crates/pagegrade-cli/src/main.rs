use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use pagegrade_cli::OutputFormat;
use pagegrade_cli::commands;
use pagegrade_cli::commands::analyze::AnalyzeOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pagegrade")]
#[command(author, version, long_about = None)]
#[command(
    about = "Grade a web page's load performance from its resource timings",
    long_about = "pagegrade loads a page in headless Chrome, reads the browser's resource-timing \
                  entries and reports a letter grade plus size and request breakdowns by content \
                  type, domain and file."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a page in headless Chrome and grade it
    ///
    /// With no --url, --html or --html-file, asks interactively.
    Analyze {
        /// URL of the web page to analyze
        #[arg(short, long, conflicts_with_all = ["html", "html_file"])]
        url: Option<String>,

        /// HTML content to analyze
        #[arg(long, conflicts_with = "html_file")]
        html: Option<String>,

        /// File containing HTML content to analyze
        #[arg(long, value_name = "PATH")]
        html_file: Option<PathBuf>,

        /// Path to the Chrome binary
        #[arg(long, env = "PAGEGRADE_CHROME", value_name = "PATH")]
        chrome_path: Option<PathBuf>,

        /// Show the browser window instead of running headless
        #[arg(long)]
        headful: bool,

        /// Disable the Chrome sandbox (needed as root in containers)
        #[arg(long)]
        no_sandbox: bool,

        /// Milliseconds to wait after load for late requests
        #[arg(long, env = "PAGEGRADE_SETTLE_MS", default_value_t = 500)]
        settle_ms: u64,

        /// Seconds to wait for navigation before giving up
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,

        /// Also write the collected resource timings to this file
        #[arg(long, value_name = "PATH")]
        save_snapshot: Option<PathBuf>,
    },

    /// Grade a saved snapshot without launching a browser
    Report {
        /// Path to a snapshot written by `analyze --save-snapshot`
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS: bash, zsh, fish, powershell, elvish\n\n\
                            INSTALLATION:\n  \
                            bash: pagegrade completion --shell bash >> ~/.bashrc\n  \
                            zsh:  pagegrade completion --shell zsh >> ~/.zshrc")]
    Completion {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);
    tracing::debug!("Output format: {}", cli.format.as_str());

    match cli.command {
        Commands::Analyze {
            url,
            html,
            html_file,
            chrome_path,
            headful,
            no_sandbox,
            settle_ms,
            timeout_secs,
            save_snapshot,
        } => commands::analyze::execute(
            AnalyzeOptions {
                url,
                html,
                html_file,
                chrome_path,
                headful,
                no_sandbox,
                settle_ms,
                timeout_secs,
                save_snapshot,
            },
            cli.format,
        ),
        Commands::Report { file } => commands::report::execute(&file, cli.format),
        Commands::Completion { shell } => {
            commands::completion::execute(shell, &mut Cli::command())
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("pagegrade=debug,pagegrade_cli=debug,pagegrade_core=debug,pagegrade_browser=debug")
    } else {
        EnvFilter::new("pagegrade=info")
    };

    // Logs go to stderr so JSON on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
