//! Web front end: a single form that posts English text to the
//! translation service and renders the French result.

mod client;
pub mod handlers;
pub mod page;

pub use client::{ApiClient, ClientError};
pub use page::{Notice, escape_html};

use crate::{Result, config::Config};
use axum::{Router, routing::get};
use handlers::UiState;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(state: UiState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let client = ApiClient::new(&config.ui.api_url, config.ui.timeout_secs);
    info!("Translation service expected at {}", client.translate_url());

    let app = router(UiState { client });

    let addr = SocketAddr::new(config.ui.host.parse()?, config.ui.port);

    info!("Starting web UI on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
