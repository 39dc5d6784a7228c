use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use doctor_review::{
    api,
    config::{ConfigOverrides, ReviewConfig},
    export,
    session::{ReviewSession, SessionStore},
};

#[derive(Parser)]
#[command(name = "review")]
#[command(about = "Review proposed updates to doctor profiles")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the review server
    Serve(ServeArgs),
    /// Check whether the review server is up
    Status(AddressArgs),
    /// Print a CSV snapshot of the seed rows to stdout
    Export {
        /// JSON seed file (defaults to the built-in rows)
        #[arg(long, env = "DOCTOR_REVIEW_SEED")]
        seed: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
struct AddressArgs {
    /// Address the server binds to
    #[arg(short, long, env = "DOCTOR_REVIEW_ADDRESS")]
    address: Option<String>,

    /// Port for the review page and HTTP API
    #[arg(short, long, env = "DOCTOR_REVIEW_PORT")]
    port: Option<u16>,
}

#[derive(Args, Default)]
struct ServeArgs {
    #[command(flatten)]
    addr: AddressArgs,

    /// Reviewer name recorded in the audit log
    #[arg(short, long, env = "DOCTOR_REVIEW_REVIEWER")]
    reviewer: Option<String>,

    /// JSON seed file (defaults to the built-in rows)
    #[arg(long, env = "DOCTOR_REVIEW_SEED")]
    seed: Option<PathBuf>,
}

/// Commands that print their result to stdout log to stderr instead, so the
/// output stays clean (e.g. `review export > snapshot.csv`).
fn logs_to_stderr(command: &Option<Commands>) -> bool {
    matches!(command, Some(Commands::Export { .. }) | Some(Commands::Status(_)))
}

/// Initialize tracing with output to stderr (for export/status) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "doctor_review=debug,tower_http=debug".into()),
    );

    if use_stderr {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(logs_to_stderr(&cli.command));

    match cli.command {
        Some(Commands::Serve(args)) => serve(args).await?,
        Some(Commands::Status(args)) => status(args).await?,
        Some(Commands::Export { seed }) => {
            let config = ReviewConfig::load().with_overrides(ConfigOverrides {
                seed_path: seed,
                ..Default::default()
            });
            let doctors = config.load_doctors()?;
            print!("{}", export::snapshot_csv(&doctors));
        }
        // Default: start server
        None => serve(ServeArgs::default()).await?,
    }

    Ok(())
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = ReviewConfig::load().with_overrides(ConfigOverrides {
        address: args.addr.address,
        port: args.addr.port,
        reviewer: args.reviewer,
        seed_path: args.seed,
    });

    let doctors = config.load_doctors()?;
    tracing::info!(
        "Starting review session for {} with {} doctors",
        config.reviewer,
        doctors.len()
    );

    let session = ReviewSession::new(config.reviewer.clone(), doctors)?;
    let app = api::create_router(SessionStore::new(session));

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;
    tracing::info!("Review server listening on {}", config.base_url());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Review server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn status(args: AddressArgs) -> anyhow::Result<()> {
    let config = ReviewConfig::load().with_overrides(ConfigOverrides {
        address: args.address,
        port: args.port,
        ..Default::default()
    });
    let url = format!("{}/health", config.base_url());

    println!("Checking review server status at {}...", config.base_url());
    let response = reqwest::Client::new()
        .get(&url)
        .timeout(Duration::from_secs(3))
        .send()
        .await
        .with_context(|| format!("Review server is not reachable at {}", config.base_url()))?;

    if response.status().is_success() {
        println!("Review server is up at {}", config.base_url());
        Ok(())
    } else {
        anyhow::bail!("Review server health check failed: {}", response.status())
    }
}
