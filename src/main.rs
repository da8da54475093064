use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use empathy_engine::{EngineConfig, SynthesisRequest, init, routes, state::AppState};

/// Empathy Engine - Emotion-aware text-to-speech
#[derive(Parser, Debug)]
#[command(name = "empathy-engine")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Text to synthesize
    #[arg(long, value_name = "TEXT")]
    text: Option<String>,

    /// Output audio file (.mp3 or .wav)
    #[arg(long, value_name = "PATH", default_value = "output.mp3")]
    out: PathBuf,

    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP interface
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match cli.config.as_deref() {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            EngineConfig::from_file(path)?
        }
        None => EngineConfig::from_env()?,
    };

    match cli.command {
        Some(Commands::Serve) => serve(config).await,
        None => {
            let Some(text) = cli.text else {
                Cli::command()
                    .error(
                        ErrorKind::MissingRequiredArgument,
                        "--text <TEXT> is required unless a subcommand is given",
                    )
                    .exit();
            };
            speak(config, text, cli.out).await
        }
    }
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn speak(config: EngineConfig, text: String, out: PathBuf) -> anyhow::Result<()> {
    let pipeline = init::build_pipeline(&config)?;
    let request = SynthesisRequest::new(text, out);

    let outcome = pipeline
        .run(request)
        .await
        .context("Failed to synthesize speech")?;

    println!(
        "Detected Emotion: {} (confidence={:.2})",
        outcome.classification.label().as_str().to_uppercase(),
        outcome.classification.confidence()
    );
    println!(
        "Done! File saved as '{}' in {:.2} seconds.",
        outcome.output_path.display(),
        outcome.elapsed.as_secs_f64()
    );
    Ok(())
}

async fn serve(config: EngineConfig) -> anyhow::Result<()> {
    let address = config.address();
    println!("Starting server on {address}");

    let app_state = AppState::from_config(config).await?;
    let app = routes::create_app(app_state);

    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{}': {}", address, e))?;

    println!("Server listening on http://{}", socket_addr);

    let listener = TcpListener::bind(&socket_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
