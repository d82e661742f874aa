//! Translation engines and the one-time choice between them.
//!
//! The service picks an [`Engine`] at startup. In a cloud deployment, or when
//! the local MarianMT model cannot be loaded, it settles on the hosted
//! translator for the rest of the process lifetime.

mod cloud;
mod local;

pub use cloud::CloudTranslator;
pub use local::{LocalModel, ModelFiles};

use crate::{Error, Result, config::EngineConfig};
use std::sync::Arc;
use tracing::{info, warn};

pub const LOCAL_ENGINE_LABEL: &str = "Modèle MarianMT (IA Locale)";
pub const CLOUD_ENGINE_LABEL: &str = "Traducteur Cloud (Optimisé RAM)";

/// Where the process runs, read once from the environment at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    Local,
    Cloud,
}

impl Deployment {
    pub fn detect(env_var: &str) -> Self {
        Self::from_value(std::env::var(env_var).ok().as_deref())
    }

    /// Any non-empty value marks a cloud deployment.
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Self::Cloud,
            _ => Self::Local,
        }
    }
}

pub enum Engine {
    Local(Arc<LocalModel>),
    Cloud(CloudTranslator),
}

impl Engine {
    /// Chooses the engine for the lifetime of the process.
    ///
    /// A failed local load is logged and answered with the cloud engine;
    /// it is never retried.
    pub async fn select(config: &EngineConfig, deployment: Deployment) -> Result<Self> {
        info!(
            "Detected environment: {}",
            match deployment {
                Deployment::Cloud => "CLOUD",
                Deployment::Local => "LOCAL",
            }
        );

        if deployment == Deployment::Cloud {
            info!("Cloud deployment, skipping local model to save memory");
            return Ok(Self::Cloud(CloudTranslator::new(&config.cloud)?));
        }

        match LocalModel::load(&config.local).await {
            Ok(model) => {
                info!("Local translation model ready");
                Ok(Self::Local(Arc::new(model)))
            }
            Err(e) => {
                warn!("Failed to load local model, falling back to cloud translator: {}", e);
                Ok(Self::Cloud(CloudTranslator::new(&config.cloud)?))
            }
        }
    }

    pub async fn translate(&self, text: &str) -> Result<String> {
        if text.is_empty() {
            return Err(Error::EmptyText);
        }

        match self {
            Self::Local(model) => {
                let model = Arc::clone(model);
                let text = text.to_string();
                tokio::task::spawn_blocking(move || model.translate(&text))
                    .await
                    .map_err(|e| Error::internal(format!("Inference task failed: {}", e)))?
            }
            Self::Cloud(translator) => translator.translate(text).await,
        }
    }

    /// Name reported to clients in the `moteur` field.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Local(_) => LOCAL_ENGINE_LABEL,
            Self::Cloud(_) => CLOUD_ENGINE_LABEL,
        }
    }

    /// Mode reported by the health route.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Local(_) => "Local AI",
            Self::Cloud(_) => "Cloud",
        }
    }

    /// True when requests go to the hosted translator, whether by choice or
    /// because the local model failed to load.
    pub fn is_cloud(&self) -> bool {
        matches!(self, Self::Cloud(_))
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local(_) => f.write_str("Engine::Local"),
            Self::Cloud(translator) => f.debug_tuple("Engine::Cloud").field(translator).finish(),
        }
    }
}
