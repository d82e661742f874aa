use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// Body in the shape returned by the hosted translator: one entry per sentence.
pub fn cloud_body(segments: &[&str]) -> Value {
    let sentences: Vec<Value> = segments
        .iter()
        .map(|segment| json!([segment, "source", null, null, 10]))
        .collect();
    json!([sentences, null, "en"])
}

/// Hosted translator answering every request with `segments`.
pub async fn mock_cloud_translator(segments: &[&str]) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cloud_body(segments)))
        .mount(&server)
        .await;
    server
}

/// Hosted translator that fails with `status`.
pub async fn failing_cloud_translator(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

/// Translation service as seen by the web UI.
pub async fn mock_translation_service(status: u16, body: Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;
    server
}
