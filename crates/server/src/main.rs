mod api;
mod dto;
mod state;

use crate::state::AppState;
use axum::routing::{get, post};
use fleetmap::routing::Config;
use std::sync::Arc;
use tracing::{error, info};

const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let port = match std::env::var("PORT") {
        Ok(port) => match port.trim().parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                error!("PORT={port:?} is not a valid port number");
                std::process::exit(1);
            }
        },
        Err(_) => DEFAULT_PORT,
    };

    let config = Config::from_env();
    if config.api_key().is_none() {
        info!(
            "No routing API key in {}, maps will use straight-line routes",
            config.key_source.describe()
        );
    }
    let state = Arc::new(AppState::new(config));

    let app = axum::Router::new()
        .route("/health", get(api::health))
        .route("/map/route", post(api::route_map))
        .route("/map/routes", post(api::fleet_map))
        .route("/map/route-data", post(api::planned_route_map))
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", port)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {port}: {err}");
            std::process::exit(1);
        }
    };
    info!("Listening to port {port}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
    }
}
