use crate::{Error, Result, config::CloudConfig};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Client for the hosted translation API, pinned to one language pair.
#[derive(Debug, Clone)]
pub struct CloudTranslator {
    http: reqwest::Client,
    base_url: String,
    source: String,
    target: String,
}

impl CloudTranslator {
    pub fn new(config: &CloudConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            source: config.source.clone(),
            target: config.target.clone(),
        })
    }

    pub async fn translate(&self, text: &str) -> Result<String> {
        // The hosted API has nothing to translate in blank text and answers `[null, ...]`
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let url = format!("{}/translate_a/single", self.base_url);
        debug!(
            "Calling cloud translator {} ({} -> {})",
            url, self.source, self.target
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", self.source.as_str()),
                ("tl", self.target.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::translation(format!(
                "Cloud translator returned HTTP {}",
                status
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::translation(format!("Unreadable cloud response: {}", e)))?;

        join_segments(&body)
    }
}

/// Reassembles the translated sentence segments: `[[["Bonjour", "Hello", ...], ...], ...]`.
/// A `null` segment list means there was nothing to translate.
fn join_segments(body: &Value) -> Result<String> {
    let segments = match body.get(0) {
        Some(Value::Array(segments)) => segments,
        Some(Value::Null) => return Ok(String::new()),
        _ => return Err(Error::translation("Unexpected cloud response format")),
    };

    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect())
}
