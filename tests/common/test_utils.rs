use axum::{body::Body, http::Response};
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;
use tokio::fs;
use traducteur::{
    Result,
    config::{CloudConfig, Config, EngineConfig, LocalModelConfig, LogsConfig, ServerConfig, UiConfig},
    engine::{Deployment, Engine},
};

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        engine: EngineConfig {
            cloud_env_var: "TRADUCTEUR_TEST_CLOUD".to_string(),
            local: LocalModelConfig {
                model_dir: "/nonexistent/traducteur-model".to_string(),
                hub_repo: None,
                ..LocalModelConfig::default()
            },
            cloud: cloud_config("http://127.0.0.1:1"),
        },
        ui: UiConfig {
            host: "127.0.0.1".to_string(),
            port: 8501,
            api_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 5,
            logs: LogsConfig::default(),
        },
    }
}

pub fn cloud_config(base_url: &str) -> CloudConfig {
    CloudConfig {
        base_url: base_url.to_string(),
        source: "en".to_string(),
        target: "fr".to_string(),
        timeout_secs: 5,
    }
}

/// Engine config whose local model can never load, so selection falls back to `base_url`.
pub fn unloadable_engine_config(model_dir: &Path, base_url: &str) -> EngineConfig {
    EngineConfig {
        cloud_env_var: "TRADUCTEUR_TEST_CLOUD".to_string(),
        local: LocalModelConfig {
            model_dir: model_dir.to_string_lossy().to_string(),
            hub_repo: None,
            ..LocalModelConfig::default()
        },
        cloud: cloud_config(base_url),
    }
}

/// Cloud engine pointed at a (mock) translation API.
pub async fn cloud_engine(base_url: &str) -> Engine {
    let config = EngineConfig {
        cloud: cloud_config(base_url),
        ..create_test_config().engine
    };
    Engine::select(&config, Deployment::Cloud).await.unwrap()
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 9000
  logs:
    level: "debug"
engine:
  cloud_env_var: "ON_CLOUD"
  local:
    model_dir: "/models/opus-mt-en-fr"
    hub_repo: null
    tokenizer_repo: null
    max_new_tokens: 256
  cloud:
    base_url: "http://localhost:9999"
    timeout_secs: 10
ui:
  port: 9501
  api_url: "http://api.internal:9000"
"#;
