pub mod handlers;
pub mod types;

use crate::{
    Result,
    config::Config,
    engine::{Deployment, Engine},
};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/translate", post(handlers::translate))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    // Engine choice is made once, before accepting traffic
    let deployment = Deployment::detect(&config.engine.cloud_env_var);
    let engine = Engine::select(&config.engine, deployment).await?;
    info!(
        "Translation engine: {} (mode: {})",
        engine.label(),
        engine.mode()
    );

    let app = router(AppState::new(engine));

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting translation service on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
