use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_api_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Environment variable whose presence marks a resource-constrained cloud deployment.
    #[serde(default = "default_cloud_env_var")]
    pub cloud_env_var: String,
    #[serde(default)]
    pub local: LocalModelConfig,
    #[serde(default)]
    pub cloud: CloudConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalModelConfig {
    #[serde(default = "default_model_dir")]
    pub model_dir: String,
    /// Hub checkpoint used when `model_dir` does not exist. `None` disables downloads.
    #[serde(default = "default_hub_repo")]
    pub hub_repo: Option<String>,
    #[serde(default = "default_model_revision")]
    pub revision: String,
    #[serde(default = "default_config_file")]
    pub config_file: String,
    #[serde(default = "default_weights_file")]
    pub weights_file: String,
    /// Hub repository holding the converted tokenizers. `None` reads them from `hub_repo`.
    #[serde(default = "default_tokenizer_repo")]
    pub tokenizer_repo: Option<String>,
    #[serde(default = "default_revision")]
    pub tokenizer_revision: String,
    // Tokenizers in the `tokenizers` JSON format, one per side of the language pair
    #[serde(default = "default_source_tokenizer")]
    pub source_tokenizer: String,
    #[serde(default = "default_target_tokenizer")]
    pub target_tokenizer: String,
    #[serde(default = "default_max_tokens")]
    pub max_input_tokens: usize,
    #[serde(default = "default_max_tokens")]
    pub max_new_tokens: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudConfig {
    #[serde(default = "default_cloud_base_url")]
    pub base_url: String,
    #[serde(default = "default_source_lang")]
    pub source: String,
    #[serde(default = "default_target_lang")]
    pub target: String,
    #[serde(default = "default_cloud_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_ui_port")]
    pub port: u16,
    /// Base URL of the translation service.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_ui_timeout")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub logs: LogsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_api_port(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cloud_env_var: default_cloud_env_var(),
            local: LocalModelConfig::default(),
            cloud: CloudConfig::default(),
        }
    }
}

impl Default for LocalModelConfig {
    fn default() -> Self {
        Self {
            model_dir: default_model_dir(),
            hub_repo: default_hub_repo(),
            revision: default_model_revision(),
            config_file: default_config_file(),
            weights_file: default_weights_file(),
            tokenizer_repo: default_tokenizer_repo(),
            tokenizer_revision: default_revision(),
            source_tokenizer: default_source_tokenizer(),
            target_tokenizer: default_target_tokenizer(),
            max_input_tokens: default_max_tokens(),
            max_new_tokens: default_max_tokens(),
        }
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            base_url: default_cloud_base_url(),
            source: default_source_lang(),
            target: default_target_lang(),
            timeout_secs: default_cloud_timeout(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_ui_port(),
            api_url: default_api_url(),
            timeout_secs: default_ui_timeout(),
            logs: LogsConfig::default(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_api_port() -> u16 {
    8000
}

fn default_ui_port() -> u16 {
    8501
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cloud_env_var() -> String {
    "RENDER".to_string()
}

fn default_model_dir() -> String {
    "./modele_final_local".to_string()
}

fn default_hub_repo() -> Option<String> {
    Some("Helsinki-NLP/opus-mt-en-fr".to_string())
}

// Ref of the checkpoint that carries model.safetensors
fn default_model_revision() -> String {
    "refs/pr/9".to_string()
}

fn default_revision() -> String {
    "main".to_string()
}

fn default_tokenizer_repo() -> Option<String> {
    Some("lmz/candle-marian".to_string())
}

fn default_config_file() -> String {
    "config.json".to_string()
}

fn default_weights_file() -> String {
    "model.safetensors".to_string()
}

fn default_source_tokenizer() -> String {
    "tokenizer-marian-base-en-fr-en.json".to_string()
}

fn default_target_tokenizer() -> String {
    "tokenizer-marian-base-en-fr-fr.json".to_string()
}

fn default_max_tokens() -> usize {
    512
}

fn default_cloud_base_url() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_source_lang() -> String {
    "en".to_string()
}

fn default_target_lang() -> String {
    "fr".to_string()
}

fn default_cloud_timeout() -> u64 {
    30
}

fn default_api_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_ui_timeout() -> u64 {
    60
}
