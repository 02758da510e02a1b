use std::future::IntoFuture;
use std::process::ExitCode;
use std::sync::Arc;

use itinerary_server::config::AppConfig;
use itinerary_server::error::ServerError;
use itinerary_server::feed::{FeedClient, FeedFetcher};
use itinerary_server::resolver::ItineraryResolver;
use itinerary_server::schedule;
use itinerary_server::store::{self, DocumentStore};
use itinerary_server::web::{AppState, create_router};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Last-resort report for anything that escapes the normal error paths
    std::panic::set_hook(Box::new(|info| {
        error!(panic = %info, "unhandled panic");
    }));

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "fatal error, shutting down");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServerError> {
    let config = AppConfig::from_env()?;

    let store = match &config.store_path {
        Some(path) => {
            info!(path = %path.display(), "opening itinerary store");
            DocumentStore::open(path)?
        }
        None => {
            warn!("STORE_PATH not set; itineraries are kept in memory only");
            DocumentStore::in_memory()
        }
    };
    store::prepare(&store).await?;

    let client = FeedClient::new(config.feed.clone())?;
    let fetcher = FeedFetcher::new(client, Arc::new(config.consortia.clone()));
    let resolver = Arc::new(ItineraryResolver::new(store, fetcher));

    info!("itinerary server starting");
    resolver.refresh().await;

    let refresher = resolver.clone();
    let mut refresh_task = schedule::every(config.refresh_interval, move || {
        let resolver = refresher.clone();
        async move { resolver.refresh().await }
    });

    let app = create_router(AppState::new(resolver));
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(addr = %config.listen_addr, "listening");

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .into_future();

    tokio::select! {
        result = server => result?,
        result = refresh_task.wait() => {
            // Nothing cancels the task while serving, so it can only have died
            result?;
            return Ok(());
        }
    }

    info!("shutting down");
    refresh_task.stop().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
