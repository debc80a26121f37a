use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use walkshed_core::config::Settings;
use walkshed_server::{AppState, build_router};

#[derive(Parser, Debug)]
#[command(name = "walkshed-server", about = "Detroit amenity finder web server")]
struct Args {
    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides the settings file
    #[arg(short, long)]
    bind: Option<String>,

    /// Load the city data before accepting requests
    #[arg(long)]
    preload: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        settings.server.bind = bind;
    }
    let bind = settings.server.bind.clone();

    let state = Arc::new(AppState::from_settings(settings)?);

    if args.preload {
        let preload_state = Arc::clone(&state);
        tokio::task::spawn_blocking(move || {
            preload_state.cache.load(
                &preload_state.settings.load_config(),
                preload_state.source.as_ref(),
                preload_state.geocoder.as_ref(),
            )
        })
        .await??;
    }

    let listener = TcpListener::bind(&bind).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
}
