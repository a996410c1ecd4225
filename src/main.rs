//! Hanvox - YouTube to Korean Speech Pipeline
//!
//! This is the main entry point for the Hanvox application, which turns
//! an English YouTube video into Korean speech using yt-dlp, whisper,
//! and ollama.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_appender::{non_blocking, rolling};

use hanvox::cli::{Args, Commands};
use hanvox::config::Config;
use hanvox::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    // Load configuration
    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            // Try to load config.toml from current directory first
            if std::path::Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    // Create workflow instance
    let workflow = Workflow::new(config)?;

    // Execute command
    match args.command {
        Commands::Run { url, output, output_dir } => {
            info!("Processing video URL: {}", url);
            workflow.run(&url, &output, output_dir.as_deref()).await?;
        }
        Commands::Extract { url, output } => {
            info!("Extracting audio from: {}", url);
            workflow.extract_audio(&url, &output).await?;
        }
        Commands::Transcribe { input, output, language } => {
            info!("Transcribing audio: {}", input.display());
            workflow.transcribe_audio(&input, &output, language.as_deref()).await?;
        }
        Commands::Translate { input, output } => {
            info!("Translating transcript: {}", input.display());
            workflow.translate_file(&input, &output).await?;
        }
        Commands::Synthesize { input, output } => {
            info!("Synthesizing speech from: {}", input.display());
            workflow.synthesize_file(&input, &output).await?;
        }
    }

    info!("Hanvox completed successfully");
    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let hanvox_dir = std::env::current_dir()?.join(".hanvox");
    let log_dir = hanvox_dir.join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "hanvox.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    // Determine log level
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Create console layer
    let console_layer = fmt::layer()
        .with_target(false);

    // Create file layer
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_ansi(false); // No ANSI colors in file

    // Setup layered subscriber
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer);

    // Initialize the subscriber
    subscriber.try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - console: {}, file: {}",
          log_level, log_dir.join("hanvox.log").display());

    Ok(())
}
