use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use duel_core::Vocabulary;
use duel_server::{
    build_dispatcher, config::Config, create_routes, scheduler::TokioScheduler,
    server_state::ServerState,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting word duel server...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let vocabulary = match Vocabulary::load(config.word_list_path.as_deref()) {
        Ok(vocabulary) => vocabulary,
        Err(e) => {
            tracing::error!("Failed to load vocabulary: {:#}", e);
            std::process::exit(1);
        }
    };
    info!("Loaded {} words", vocabulary.len());

    let addr: std::net::IpAddr = match config.host.parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid HOST {:?}: {}", config.host, e);
            std::process::exit(1);
        }
    };

    let state = ServerState::new(vocabulary, config.delays());
    let dispatcher = build_dispatcher(state, Arc::new(TokioScheduler));
    let routes = create_routes(dispatcher, config.rate_limit());

    let server = warp::serve(routes).try_bind_with_graceful_shutdown((addr, config.port), async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            match (
                signal::unix::signal(signal::unix::SignalKind::interrupt()),
                signal::unix::signal(signal::unix::SignalKind::terminate()),
            ) {
                (Ok(mut sigint), Ok(mut sigterm)) => {
                    tokio::select! {
                        _ = sigint.recv() => {
                            info!("Received SIGINT, shutting down gracefully...");
                        }
                        _ = sigterm.recv() => {
                            info!("Received SIGTERM, shutting down gracefully...");
                        }
                    }
                }
                _ => {
                    tracing::error!("Failed to install signal handlers; running until killed");
                    std::future::pending::<()>().await;
                }
            }
        }

        #[cfg(not(unix))]
        {
            if signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl+C, shutting down gracefully...");
            }
        }
    });

    let (addr, server) = match server {
        Ok(bound) => bound,
        Err(e) => {
            tracing::error!("Failed to bind {}:{}: {}", config.host, config.port, e);
            std::process::exit(1);
        }
    };

    info!("Server started on {}. Press Ctrl+C to stop.", addr);
    server.await;
    info!("Server shutdown complete.");
}
