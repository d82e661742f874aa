use super::{
    client::{ApiClient, ClientError},
    page::{self, Notice},
};
use axum::{Form, extract::State, response::Html};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Clone)]
pub struct UiState {
    pub client: ApiClient,
}

#[derive(Debug, Deserialize)]
pub struct TranslateForm {
    #[serde(default)]
    pub text: String,
}

pub async fn index() -> Html<String> {
    Html(page::render("", None))
}

pub async fn submit(State(state): State<UiState>, Form(form): Form<TranslateForm>) -> Html<String> {
    if form.text.is_empty() {
        let notice = Notice::Warning(page::EMPTY_INPUT_WARNING.to_string());
        return Html(page::render("", Some(&notice)));
    }

    let notice = match state.client.translate(&form.text).await {
        Ok(response) => {
            info!("Translation served by {}", response.engine);
            Notice::Success {
                translation: response.translation,
                engine: response.engine,
            }
        }
        Err(e) => {
            warn!("Translation request to {} failed: {}", state.client.translate_url(), e);
            notice_for(e)
        }
    };

    Html(page::render(&form.text, Some(&notice)))
}

fn notice_for(error: ClientError) -> Notice {
    match error {
        ClientError::Connection(_) => Notice::Error {
            message: page::CONNECTION_ERROR.to_string(),
            hint: Some(page::CONNECTION_HINT.to_string()),
        },
        ClientError::Timeout => Notice::Error {
            message: page::TIMEOUT_ERROR.to_string(),
            hint: None,
        },
        ClientError::Api { status, detail } => Notice::Error {
            message: format!("Erreur API : {}", status),
            hint: detail,
        },
        ClientError::Decode(e) => Notice::Error {
            message: format!("Réponse de l'API illisible : {}", e),
            hint: None,
        },
    }
}
