use super::types::{ErrorResponse, HealthResponse, TranslationRequest, TranslationResponse};
use crate::{Error, engine::Engine};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
}

impl AppState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

pub async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslationRequest>, JsonRejection>,
) -> Result<Json<TranslationResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected translation request {}: {}", request_id, rejection);
        (
            rejection.status(),
            Json(ErrorResponse {
                detail: rejection.body_text(),
            }),
        )
    })?;
    info!(
        "Received translation request {} ({} chars)",
        request_id,
        request.text.chars().count()
    );

    if request.text.is_empty() {
        warn!("Rejected translation request {}: empty text", request_id);
        return Err(error_response(Error::EmptyText));
    }

    match state.engine.translate(&request.text).await {
        Ok(translation) => {
            info!(
                "Translated request {} with {}",
                request_id,
                state.engine.label()
            );
            Ok(Json(TranslationResponse {
                original: request.text,
                translation,
                engine: state.engine.label().to_string(),
            }))
        }
        Err(e) => {
            error!("Failed to translate request {}: {}", request_id, e);
            Err(error_response(e))
        }
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "online".to_string(),
        mode: state.engine.mode().to_string(),
    })
}

fn error_response(e: Error) -> (StatusCode, Json<ErrorResponse>) {
    (
        e.status_code(),
        Json(ErrorResponse {
            detail: e.to_string(),
        }),
    )
}
