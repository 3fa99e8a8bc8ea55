use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use streamfilter_core::Transducer;
use streamfilter_logging::{init_tracing, ErrorLog, LogFormat};

mod config;

use config::{ProjectConfig, Settings};

#[derive(Parser, Debug)]
#[command(
    name = "streamfilter",
    about = "Turn an agent's stream-json output into readable progress lines",
    version,
    author
)]
struct Cli {
    /// JSONL file that tool errors are appended to (default: logs/errors.jsonl)
    #[arg(long, env = "ERROR_LOG")]
    error_log: Option<PathBuf>,

    /// Iteration tag stamped on every error entry (default: ?)
    #[arg(long, env = "ITERATION")]
    iteration: Option<String>,

    /// Project config file (default: ./streamfilter.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Diagnostic log level, written to stderr. RUST_LOG takes precedence.
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Diagnostic log format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormatChoice,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Text,
    Json,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Text => LogFormat::Text,
            LogFormatChoice::Json => LogFormat::Json,
        }
    }
}

impl Cli {
    /// Resolve flags and environment against the project file, if any.
    fn settings(&self, working_dir: &Path) -> Result<Settings> {
        let project = match &self.config {
            Some(path) => Some(
                ProjectConfig::load_file(path)?
                    .with_context(|| format!("Config file not found: {}", path.display()))?,
            ),
            None => ProjectConfig::load(working_dir)?,
        };
        Ok(Settings::resolve(
            self.error_log.clone(),
            self.iteration.clone(),
            project,
        ))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.log_format.into());

    let working_dir = std::env::current_dir().context("Failed to get current directory")?;
    let settings = cli.settings(&working_dir)?;

    info!(
        error_log = %settings.error_log.display(),
        iteration = settings.iteration.as_str(),
        "Starting stream filter"
    );

    let error_log = ErrorLog::new(settings.error_log, settings.iteration);
    let stdout = io::stdout();
    let mut transducer = Transducer::new(stdout.lock(), error_log);

    let stats = transducer
        .run(io::stdin().lock())
        .context("Stream processing failed")?;

    info!(
        lines = stats.lines_read,
        skipped = stats.lines_skipped,
        printed = stats.console_lines,
        errors = stats.errors_recorded,
        dropped = stats.errors_dropped,
        "End of input"
    );

    Ok(())
}
