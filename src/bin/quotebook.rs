//! Quotebook Server Binary
//!
//! # Examples
//!
//! ```bash
//! # Start server
//! quotebook serve --host 0.0.0.0 --port 8080
//!
//! # Start with 16 partitions and a config file
//! quotebook serve --partitions 16 --config quotebook.toml
//!
//! # Print the effective configuration
//! quotebook config --config quotebook.toml
//! ```

use clap::{Args, Parser, Subcommand};
use quotebook::config::Settings;
use quotebook::server::start_server;
use quotebook::storage::{DefaultStorageEngine, KeyAllocator, Storage};
use quotebook::QuoteService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Quotebook - in-memory quote storage service
#[derive(Parser, Debug)]
#[command(name = "quotebook")]
#[command(version = quotebook::VERSION)]
#[command(about = "Quotebook - in-memory quote storage service", long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "QUOTEBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log directory for daily rolling files
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Quotebook server
    Serve(ServeArgs),

    /// Print the effective configuration as TOML
    Config,

    /// Show version
    Version,
}

/// Server arguments, overriding the configuration file
#[derive(Args, Debug)]
struct ServeArgs {
    /// HTTP bind address
    #[arg(long)]
    host: Option<String>,

    /// HTTP port
    #[arg(short, long)]
    port: Option<u16>,

    /// Number of storage partitions
    #[arg(long)]
    partitions: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    apply_global_overrides(&mut settings, &cli);

    match cli.command {
        Commands::Serve(args) => {
            apply_serve_overrides(&mut settings, args);
            settings.validate()?;
            let _guard = setup_logging(&settings)?;
            serve_command(settings).await
        }
        Commands::Config => {
            print!("{}", settings.to_toml()?);
            Ok(())
        }
        Commands::Version => {
            println!("Quotebook {}", quotebook::VERSION);
            Ok(())
        }
    }
}

fn apply_global_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(level) = &cli.log_level {
        settings.logging.level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        settings.logging.dir = Some(dir.clone());
    }
    if cli.no_color {
        settings.logging.ansi = false;
    }
}

fn apply_serve_overrides(settings: &mut Settings, args: ServeArgs) {
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    if let Some(partitions) = args.partitions {
        settings.storage.partitions = partitions;
    }
}

/// Setup logging with console output and optional rolling files
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process.
fn setup_logging(settings: &Settings) -> anyhow::Result<Option<WorkerGuard>> {
    let log_level = settings
        .logging
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let console = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(settings.logging.ansi);

    let (file_layer, guard) = match &settings.logging.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, "quotebook.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Serve command - start the Quotebook server
async fn serve_command(settings: Settings) -> anyhow::Result<()> {
    info!(version = %quotebook::VERSION, "Quotebook starting");

    let engine = DefaultStorageEngine::new(settings.storage.partitions);
    let storage = Arc::new(Storage::new(Box::new(engine)));
    let service = QuoteService::new(storage, Arc::new(KeyAllocator::new()));
    info!(
        partitions = settings.storage.partitions,
        "Storage initialized"
    );

    start_server(&settings, service).await
}
