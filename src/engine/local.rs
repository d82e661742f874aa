use crate::{Error, Result, config::LocalModelConfig};
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::marian::{self, MTModel};
use hf_hub::{
    Repo, RepoType,
    api::tokio::{ApiBuilder, ApiRepo},
};
use std::path::{Path, PathBuf};
use tokenizers::Tokenizer;
use tracing::{debug, info};

/// On-disk locations of everything a MarianMT checkpoint needs.
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub weights: PathBuf,
    pub source_tokenizer: PathBuf,
    pub target_tokenizer: PathBuf,
}

impl ModelFiles {
    /// Uses `model_dir` when it exists, otherwise downloads from the hub.
    pub async fn resolve(config: &LocalModelConfig) -> Result<Self> {
        let model_dir = Path::new(&config.model_dir);
        if model_dir.is_dir() {
            info!("Loading local model from {}", model_dir.display());
            return Ok(Self::in_dir(model_dir, config));
        }

        let Some(repo_id) = &config.hub_repo else {
            return Err(Error::model_unavailable(format!(
                "no model directory at {} and no hub repository configured",
                config.model_dir
            )));
        };

        info!(
            "Model directory {} not found, fetching {}@{} from the hub",
            config.model_dir, repo_id, config.revision
        );
        Self::download(repo_id, config).await
    }

    pub fn in_dir(dir: &Path, config: &LocalModelConfig) -> Self {
        Self {
            config: dir.join(&config.config_file),
            weights: dir.join(&config.weights_file),
            source_tokenizer: dir.join(&config.source_tokenizer),
            target_tokenizer: dir.join(&config.target_tokenizer),
        }
    }

    async fn download(repo_id: &str, config: &LocalModelConfig) -> Result<Self> {
        let api = ApiBuilder::new()
            .with_progress(false)
            .build()
            .map_err(|e| Error::model_unavailable(format!("hub client: {}", e)))?;
        let model_repo = api.repo(Repo::with_revision(
            repo_id.to_string(),
            RepoType::Model,
            config.revision.clone(),
        ));

        let (tokenizer_repo_id, tokenizer_revision) = tokenizer_source(repo_id, config);
        let tokenizer_repo = api.repo(Repo::with_revision(
            tokenizer_repo_id.to_string(),
            RepoType::Model,
            tokenizer_revision.to_string(),
        ));

        Ok(Self {
            config: fetch(&model_repo, repo_id, &config.config_file).await?,
            weights: fetch(&model_repo, repo_id, &config.weights_file).await?,
            source_tokenizer: fetch(&tokenizer_repo, tokenizer_repo_id, &config.source_tokenizer)
                .await?,
            target_tokenizer: fetch(&tokenizer_repo, tokenizer_repo_id, &config.target_tokenizer)
                .await?,
        })
    }
}

/// Repository and revision the tokenizers are downloaded from.
///
/// Checkpoints on the hub ship SentencePiece models, so the converted JSON
/// tokenizers usually live in a separate repository.
fn tokenizer_source<'a>(repo_id: &'a str, config: &'a LocalModelConfig) -> (&'a str, &'a str) {
    match &config.tokenizer_repo {
        Some(tokenizer_repo) => (tokenizer_repo, &config.tokenizer_revision),
        None => (repo_id, &config.revision),
    }
}

async fn fetch(repo: &ApiRepo, repo_id: &str, file: &str) -> Result<PathBuf> {
    let path = repo
        .get(file)
        .await
        .map_err(|e| Error::model_unavailable(format!("{}/{}: {}", repo_id, file, e)))?;
    debug!("Fetched {}", path.display());
    Ok(path)
}

/// A MarianMT model and its tokenizers, loaded once and never mutated.
pub struct LocalModel {
    model: MTModel,
    config: marian::Config,
    source_tokenizer: Tokenizer,
    target_tokenizer: Tokenizer,
    device: Device,
    max_input_tokens: usize,
    max_new_tokens: usize,
}

impl LocalModel {
    pub async fn load(config: &LocalModelConfig) -> Result<Self> {
        let files = ModelFiles::resolve(config).await?;
        let max_input_tokens = config.max_input_tokens;
        let max_new_tokens = config.max_new_tokens;

        // Memory-mapping and building the graph is blocking work
        tokio::task::spawn_blocking(move || {
            Self::from_files(&files, max_input_tokens, max_new_tokens)
        })
        .await
        .map_err(|e| Error::internal(format!("Model loading task failed: {}", e)))?
    }

    pub fn from_files(
        files: &ModelFiles,
        max_input_tokens: usize,
        max_new_tokens: usize,
    ) -> Result<Self> {
        let device = Device::Cpu;

        let config_str = std::fs::read_to_string(&files.config).map_err(|e| {
            Error::model_unavailable(format!("{}: {}", files.config.display(), e))
        })?;
        let config: marian::Config = serde_json::from_str(&config_str)?;

        let source_tokenizer = load_tokenizer(&files.source_tokenizer)?;
        let target_tokenizer = load_tokenizer(&files.target_tokenizer)?;

        if !files.weights.is_file() {
            return Err(Error::model_unavailable(format!(
                "missing weights file {}",
                files.weights.display()
            )));
        }
        // SAFETY: the weights file is opened read-only and not modified while mapped.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[&files.weights], DType::F32, &device)?
        };
        let model = MTModel::new(&config, vb)?;

        info!("MarianMT model loaded from {}", files.weights.display());

        // Positions past the embedding table cannot be encoded, on either side
        let max_input_tokens = max_input_tokens
            .max(2)
            .min(config.max_position_embeddings);
        let max_new_tokens = max_new_tokens.min(config.max_position_embeddings.saturating_sub(1));

        Ok(Self {
            model,
            config,
            source_tokenizer,
            target_tokenizer,
            device,
            max_input_tokens,
            max_new_tokens,
        })
    }

    /// Greedy decoding, so the same input always yields the same output.
    /// Blocking; call it from the blocking pool.
    pub fn translate(&self, text: &str) -> Result<String> {
        let encoding = self
            .source_tokenizer
            .encode(text, true)
            .map_err(|e| Error::inference(format!("tokenization failed: {}", e)))?;
        let input_ids = clamp_input(
            encoding.get_ids(),
            self.config.eos_token_id,
            self.max_input_tokens,
        );

        // The KV cache lives in the clone, the shared weights are untouched
        let mut model = self.model.clone();

        let input = Tensor::new(input_ids.as_slice(), &self.device)?.unsqueeze(0)?;
        let encoder_xs = model.encoder().forward(&input, 0)?;

        let mut token_ids = vec![self.config.decoder_start_token_id];
        for index in 0..self.max_new_tokens {
            let context_size = if index >= 1 { 1 } else { token_ids.len() };
            let start_pos = token_ids.len().saturating_sub(context_size);
            let decoder_input = Tensor::new(&token_ids[start_pos..], &self.device)?.unsqueeze(0)?;

            let logits = model.decode(&decoder_input, &encoder_xs, start_pos)?;
            let logits = logits.squeeze(0)?;
            let logits = logits.get(logits.dim(0)? - 1)?;
            let next_token = logits.argmax(0)?.to_scalar::<u32>()?;

            if next_token == self.config.eos_token_id
                || next_token == self.config.forced_eos_token_id
            {
                break;
            }
            token_ids.push(next_token);
        }

        debug!(
            "Generated {} tokens from {} input tokens",
            token_ids.len() - 1,
            input_ids.len()
        );

        self.target_tokenizer
            .decode(&token_ids[1..], true)
            .map_err(|e| Error::inference(format!("detokenization failed: {}", e)))
    }
}

fn load_tokenizer(path: &Path) -> Result<Tokenizer> {
    Tokenizer::from_file(path)
        .map_err(|e| Error::model_unavailable(format!("{}: {}", path.display(), e)))
}

/// Truncates to `max_len` ids and makes sure the sequence ends with EOS.
fn clamp_input(ids: &[u32], eos_token_id: u32, max_len: usize) -> Vec<u32> {
    let mut ids: Vec<u32> = ids
        .iter()
        .copied()
        .filter(|&id| id != eos_token_id)
        .collect();
    ids.truncate(max_len.saturating_sub(1));
    ids.push(eos_token_id);
    ids
}
