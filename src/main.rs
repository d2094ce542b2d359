use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use quiz_presenter::config::{DEFAULT_LOG_FILE, FileSettings, Overrides};
use quiz_presenter::{Presenter, QuizError, Settings};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Question source (.xlsx, .csv, .tsv or .json) with a header row
    #[arg(short, long)]
    questions: PathBuf,

    /// Category selected at startup
    #[arg(short, long)]
    category: Option<String>,

    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible draw sequence
    #[arg(long)]
    seed: Option<u64>,

    /// File that receives the log output
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    let settings = match resolve_settings(args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // Held until exit so buffered log lines are flushed.
    let _log_guard = match init_logging(&settings.log_file) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", settings.log_file.display(), e);
            process::exit(1);
        }
    };

    let presenter = match Presenter::from_settings(&settings) {
        Ok(presenter) => presenter,
        Err(e) => {
            error!(error = %e, "startup failed");
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = presenter.run().await {
        error!(error = %e, "presenter failed");
        eprintln!("Error running presenter: {}", e);
        process::exit(1);
    }

    info!("bye");
}

fn resolve_settings(args: Args) -> Result<Settings, QuizError> {
    let file = args
        .config
        .as_deref()
        .map(|path| FileSettings::load(path))
        .transpose()?;

    let overrides = Overrides {
        category: args.category,
        seed: args.seed,
        log_file: args.log_file,
    };

    Ok(Settings::resolve(args.questions, file, overrides)?)
}

/// Log to a file; the terminal belongs to the presenter screen.
fn init_logging(log_file: &Path) -> Result<WorkerGuard, InitError> {
    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = log_file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(DEFAULT_LOG_FILE);

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("quiz_presenter=info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
