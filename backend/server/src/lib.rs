//! Documentation of a personal travel book.
//!
//! The book is a flip-book in the browser: front cover, world map, photo album, statistics and a
//! back cover. This server delivers the client bundle and keeps the book markup consistent before
//! it ever reaches the page-flip script.
//!
//!
//!
//! # General Infrastructure
//! - One process serves the prebuilt client bundle out of `CLIENT_DIR`
//! - Every client navigation gets the entry document, history-mode routing is left to the client
//! - Unknown assets and API paths get a JSON `{"error": "Not Found"}`
//! - No database, the book layout lives in the entry document itself
//!
//!
//!
//! # Book Layout
//!
//! **Goal**: the back cover must render as a standalone cover, never as the left half of a spread.
//!
//! - The entry document is scanned for page elements once at startup
//! - If the back cover sits on an even position, a blank page is added in front of it (or a
//!   trailing blank is dropped)
//! - Every page request opens the corrected document on the page its path points at, with the
//!   ribbons for that spread already applied
//! - Startup aborts when a named page or ribbon is missing from the markup
//!
//!
//!
//! # API
//!
//! Client configuration, handed out as-is.
//! ```sh
//! curl http://localhost:3000/api/config
//! ```
//!
//! Page layout after parity correction.
//! ```sh
//! curl http://localhost:3000/api/book
//! ```
//!
//! Ribbons for the spread starting at a position.
//! ```sh
//! curl "http://localhost:3000/api/book/ribbons?position=2"
//! ```
//!
//!
//!
//! # Setup
//!
//! Run with debug logs.
//! ```sh
//! RUST_LOG=debug CLIENT_DIR=dist/client cargo run --bin travel-book
//! ```
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
use std::{sync::Arc, time::Duration};

use anyhow::Error;
use axum::{
    Router,
    handler::Handler,
    http::{Method, header::CONTENT_TYPE},
    routing::{any, get},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod routes;
pub mod state;

use config::Config;
use routes::{api_not_found_handler, book_handler, config_handler, page_handler, ribbons_handler};
use state::State;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(err) = run(Config::load()).await {
        error!("Server failed: {err:#}");
    }

    info!("Server shutting down...");
}

async fn run(config: Config) -> Result<(), Error> {
    info!("Initializing state...");
    let state = State::new(config)?;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server listening on http://localhost:{}", state.config.port);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let assets = ServeDir::new(&state.config.client_dir)
        .append_index_html_on_directories(false)
        .fallback(page_handler.with_state(state.clone()));

    Router::new()
        .route("/", get(page_handler))
        .route("/index.html", get(page_handler))
        .route("/api/config", get(config_handler))
        .route("/api/book", get(book_handler))
        .route("/api/book/ribbons", get(ribbons_handler))
        .route("/api", any(api_not_found_handler))
        .route("/api/{*rest}", any(api_not_found_handler))
        .fallback_service(assets)
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(err) => {
                error!("Failed to install signal handler: {err}");
                std::future::pending::<()>().await;
            }
        }

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
