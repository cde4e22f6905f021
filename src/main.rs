use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use prorecc::{Commands, Container, ContainerConfig, RecommendationError, Router, Shell};

#[derive(Parser)]
#[command(name = "prorecc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON catalog to use instead of the bundled one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Upstream timeout in seconds (default: GEMINI_TIMEOUT_SECS or 30)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Gemini model name (default: GEMINI_MODEL or gemini-2.0-flash)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Answer every query with this text instead of calling Gemini
    #[arg(long, global = true)]
    mock_response: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("failed to initialise logging: {e}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", describe_error(&e));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = ContainerConfig {
        catalog_path: cli.catalog,
        timeout: cli.timeout.filter(|s| *s > 0).map(Duration::from_secs),
        model: cli.model,
        mock_response: cli.mock_response,
    };
    let container = Container::new(config)?;

    if let Commands::Shell = cli.command {
        return Shell::new(&container).run().await;
    }

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{output}");

    Ok(())
}

/// Recommendation failures print their shopper-facing message; anything else
/// prints the full context chain.
fn describe_error(e: &anyhow::Error) -> String {
    match e.downcast_ref::<RecommendationError>() {
        Some(err) => err.user_message(),
        None => format!("Error: {e:#}"),
    }
}
