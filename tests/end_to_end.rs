use axum_test::TestServer;
use std::net::SocketAddr;
use traducteur::{
    engine::CLOUD_ENGINE_LABEL,
    server::{self, handlers::AppState},
    ui::{self, ApiClient, handlers::UiState, page},
};

mod common;

use common::{mocks, test_utils};

/// Serves the translation API on an ephemeral port and returns its address.
async fn spawn_api(cloud_url: &str) -> SocketAddr {
    let engine = test_utils::cloud_engine(cloud_url).await;
    let app = server::router(AppState::new(engine));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_form_submission_through_api_and_cloud_engine() {
    let cloud = mocks::mock_cloud_translator(&["Bonjour le monde"]).await;
    let api_addr = spawn_api(&cloud.uri()).await;

    let state = UiState {
        client: ApiClient::new(&format!("http://{}", api_addr), 5),
    };
    let ui_server = TestServer::new(ui::router(state)).unwrap();

    let response = ui_server.post("/").form(&[("text", "Hello world")]).await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(page::SUCCESS_MESSAGE));
    assert!(html.contains("Bonjour le monde"));
    assert!(html.contains(CLOUD_ENGINE_LABEL));
}

#[tokio::test]
async fn test_api_client_reports_empty_text_as_client_error() {
    let cloud = mocks::mock_cloud_translator(&["unused"]).await;
    let api_addr = spawn_api(&cloud.uri()).await;

    let client = ApiClient::new(&format!("http://{}/", api_addr), 5);
    let err = client.translate("").await.unwrap_err();

    match err {
        ui::ClientError::Api { status, detail } => {
            assert_eq!(status, 400);
            assert_eq!(detail.as_deref(), Some("Texte vide"));
        }
        other => panic!("unexpected error: {}", other),
    }
}
