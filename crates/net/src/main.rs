//! ActivityHub server
//!
//! Loads configuration, picks a store backend, assembles the hub, and
//! serves the REST boundary.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use activityhub_core::{seed, Hub, HubConfig, JsonFileStore, MemoryStore, StorageBackend, Store};
use activityhub_net::{router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting ActivityHub");

    let config = match std::env::var("ACTIVITYHUB_CONFIG") {
        Ok(path) => match HubConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(path = %path, "Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        Err(_) => HubConfig::default(),
    };

    let store: Arc<dyn Store> = match config.storage {
        StorageBackend::Memory => {
            tracing::info!("using in-memory store");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::File => {
            let file_store = config
                .resolved_data_file()
                .and_then(JsonFileStore::open)
                .unwrap_or_else(|e| {
                    tracing::error!("Failed to open store file: {}", e);
                    std::process::exit(1);
                });
            tracing::info!(path = %file_store.path().display(), "using JSON file store");
            Arc::new(file_store)
        }
    };

    let hub = Arc::new(Hub::new(store, &config));

    if config.seed_demo {
        if let Err(e) = seed::seed_demo_data(&hub) {
            tracing::warn!("Demo seed failed: {}", e);
        }
    }

    let app = router(AppState::new(hub));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("invalid host/port in config");

    // Bind, falling back to the next port if the configured one is taken
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            let fallback = SocketAddr::new(addr.ip(), addr.port() + 1);
            tracing::warn!("Could not bind {}: {}. Trying {}", addr, e, fallback);
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("could not bind fallback port")
        }
    };

    let bound = listener.local_addr().expect("listener has no local addr");
    tracing::info!("ActivityHub listening on http://{}", bound);

    axum::serve(listener, app).await.expect("server failed");
}
