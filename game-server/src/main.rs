use std::sync::Arc;
use tokio::signal;
use tracing::info;

use game_core::{DailyWordSelector, GameSession};
use game_server::config::{Config, Mode};
use game_server::{AppState, create_routes, run_daily_reload};
use game_sheets::{
    AnalyticsPipeline, EventSink, MemoryEventSink, SheetEventSink, SheetWordSource, SheetsClient,
    StaticWordSource, WordSource, load_daily_word,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting daily word server...");

    let config = Config::new();

    let (word_source, event_sink): (Arc<dyn WordSource>, Arc<dyn EventSink>) = match config.mode {
        Mode::Local => {
            info!("Local mode: compiled-in word table, in-memory analytics");
            (
                Arc::new(StaticWordSource::builtin()),
                Arc::new(MemoryEventSink::new()),
            )
        }
        Mode::Remote => {
            info!("Remote mode: spreadsheet-backed words and analytics");
            let client = match SheetsClient::new(config.sheets_api_token.clone()) {
                Ok(client) => Arc::new(client),
                Err(err) => {
                    tracing::error!("Failed to build sheets client: {}", err);
                    std::process::exit(1);
                }
            };
            (
                Arc::new(SheetWordSource::new(
                    client.clone(),
                    config.word_sheet_id.clone(),
                )),
                Arc::new(SheetEventSink::new(
                    client,
                    config.analytics_sheet_id.clone(),
                )),
            )
        }
    };

    let selector = DailyWordSelector::new(config.selection_policy());

    // The process must not serve traffic with no word loaded.
    let record = match load_daily_word(word_source.as_ref(), &selector).await {
        Ok(record) => record,
        Err(err) => {
            tracing::error!("Failed to load the daily word: {}", err);
            tracing::error!("Check MODE, WORD_SHEET_ID and SHEETS_API_TOKEN.");
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::new(
        GameSession::new(record, config.partial_unmasking),
        AnalyticsPipeline::new(event_sink),
    ));

    // Day-rollover task
    tokio::spawn(run_daily_reload(
        state.clone(),
        word_source,
        selector,
        config.partial_unmasking,
    ));

    let routes = create_routes(state);

    info!("Server starting on {}:{}", config.host, config.port);

    let addr = (
        config.host.parse::<std::net::IpAddr>().unwrap(),
        config.port,
    );

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt()).unwrap();
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate()).unwrap();

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}
