//! # HS code finder
//!
//! Backend for a tariff-code lookup form: a free-text product description is
//! matched against an HS code reference table loaded from a CSV file at
//! startup, plus signup/login backed by Redis with bcrypt password hashing.
//!
//!
//!
//! # General Infrastructure
//!
//! - The catalog is loaded before the listener binds; a load failure logs and
//!   exits, so no matching request is ever served without data
//! - After load the catalog is immutable and shared read-only through
//!   [`state::AppState`], so concurrent matching requests need no locking
//! - Static frontend and login pages are served from configurable directories,
//!   both mounted at the root like the rest of the app
//!
//!
//!
//! # Environment
//!
//! All settings have logged defaults:
//! - `PORT`: listen port
//! - `CATALOG_PATH`: path to the HS code CSV export
//! - `REDIS_URL`: user store
//! - `FRONTEND_DIR` / `LOGIN_DIR`: static asset directories
//!
//! Log filtering is the usual `RUST_LOG` env filter.

use std::{process::exit, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::post,
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod search;
pub mod state;
pub mod user;

use routes::{login_handler, predict_handler, signup_handler};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = match AppState::new().await {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to load catalog: {e}. Exiting...");
            exit(1);
        }
    };

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let signup_page = ServeFile::new(state.config.login_dir.join("index.html"));
    let login_page = ServeFile::new(state.config.login_dir.join("login.html"));
    let static_files =
        ServeDir::new(&state.config.frontend_dir).fallback(ServeDir::new(&state.config.login_dir));

    let app = Router::new()
        .route("/predict", post(predict_handler))
        .route("/signup", post(signup_handler).get_service(signup_page))
        .route("/login", post(login_handler).get_service(login_page))
        .fallback_service(static_files)
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
