use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{info, warn};

use slot_gateway::config::Config;
use slot_gateway::state::AppState;
use slot_gateway::upstream::HttpSlotSource;
use slot_gateway::{logging, router};

#[derive(Parser)]
#[command(name = "slot_gateway")]
#[command(about = "Appointment-slot normalization gateway")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service (mock upstream + available-slots API)
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve().await,
    }
}

async fn serve() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    if config.api_keys.is_empty() {
        warn!("API_KEYS is empty; every /api request will be rejected");
    }

    let source = HttpSlotSource::new(reqwest::Client::new(), &config.upstream_url);
    let port = config.port;
    let state = AppState {
        source: Arc::new(source),
        config: Arc::new(config),
    };

    let app = router::app_router(state);
    let bind_addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Server running on port {port}");
    println!("Server running at http://localhost:{port}");
    axum::serve(listener, app).await?;
    Ok(())
}
