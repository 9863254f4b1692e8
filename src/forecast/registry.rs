//! Model Registry
//!
//! The catalog of pretrained configurations plus the currently loaded
//! model. One registry instance is owned by the server state; the loaded
//! slot sits behind a `tokio::sync::RwLock` so concurrent requests can
//! read it while loads serialize. Writers follow last-writer-wins: a
//! predictor handle cloned out before a switch keeps serving its request.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::constants::{DEFAULT_MODEL_KEY, PRETRAINED_DIR};
use crate::error::{AppError, Result};
use crate::forecast::sampler::PathSampler;
use crate::forecast::Predictor;

/// One pretrained configuration
#[derive(Debug, Clone, Copy)]
pub struct ModelSpec {
    pub key: &'static str,
    pub name: &'static str,
    pub context_length: usize,
    pub params: &'static str,
    pub description: &'static str,
}

/// Shipping configurations, smallest first
pub const MODEL_CATALOG: &[ModelSpec] = &[
    ModelSpec {
        key: "pricecast-mini",
        name: "PriceCast-mini",
        context_length: 2048,
        params: "4.1M",
        description: "Lightweight configuration with the longest context window",
    },
    ModelSpec {
        key: "pricecast-small",
        name: "PriceCast-small",
        context_length: 512,
        params: "24.7M",
        description: "Balanced configuration for everyday forecasting",
    },
    ModelSpec {
        key: "pricecast-base",
        name: "PriceCast-base",
        context_length: 512,
        params: "102.3M",
        description: "Largest configuration with the best accuracy",
    },
];

/// Look up a catalog entry by key
pub fn spec_for(key: &str) -> Option<&'static ModelSpec> {
    MODEL_CATALOG.iter().find(|s| s.key == key)
}

/// What is currently loaded, for status reporting
#[derive(Debug, Clone)]
pub struct LoadedModelInfo {
    pub key: String,
    pub name: String,
    pub device: String,
}

struct LoadedModel {
    key: String,
    device: String,
    predictor: Arc<dyn Predictor>,
}

pub struct ModelRegistry {
    root: PathBuf,
    slot: RwLock<Option<LoadedModel>>,
}

impl ModelRegistry {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            slot: RwLock::new(None),
        }
    }

    /// Whether the artifact root is present at all
    pub fn backend_available(&self) -> bool {
        self.root.is_dir()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Weight directory for a catalog entry
    pub fn model_dir(&self, key: &str) -> PathBuf {
        self.root.join(PRETRAINED_DIR).join(key)
    }

    /// Tokenizer directory for a catalog entry
    pub fn tokenizer_dir(&self, key: &str) -> PathBuf {
        self.model_dir(key).join("tokenizer")
    }

    pub async fn current(&self) -> Option<LoadedModelInfo> {
        let slot = self.slot.read().await;
        slot.as_ref().map(|m| LoadedModelInfo {
            key: m.key.clone(),
            name: spec_for(&m.key)
                .map(|s| s.name.to_string())
                .unwrap_or_else(|| m.key.clone()),
            device: m.device.clone(),
        })
    }

    /// Load a catalog entry onto a device, replacing whatever is loaded
    pub async fn load(&self, key: &str, device: &str) -> Result<Arc<dyn Predictor>> {
        let spec = spec_for(key)
            .ok_or_else(|| AppError::ModelLoadFailure(format!("unknown model key: {}", key)))?;

        if !self.backend_available() {
            return Err(AppError::ModelUnavailable(format!(
                "model root not found: {}",
                self.root.display()
            )));
        }

        let sampler = PathSampler::load(
            &self.model_dir(key),
            &self.tokenizer_dir(key),
            device,
            spec.context_length,
        )?;
        let predictor: Arc<dyn Predictor> = Arc::new(sampler);

        let mut slot = self.slot.write().await;
        *slot = Some(LoadedModel {
            key: key.to_string(),
            device: device.to_string(),
            predictor: Arc::clone(&predictor),
        });
        info!(key, device, "model loaded");

        Ok(predictor)
    }

    /// Predictor for `key`, loading or switching first when needed.
    /// Unknown keys fall back to the default configuration.
    pub async fn ensure_loaded(&self, key: &str, device: &str) -> Result<Arc<dyn Predictor>> {
        let key = if spec_for(key).is_some() {
            key
        } else {
            DEFAULT_MODEL_KEY
        };

        {
            let slot = self.slot.read().await;
            if let Some(m) = slot.as_ref() {
                if m.key == key {
                    return Ok(Arc::clone(&m.predictor));
                }
            }
        }

        self.load(key, device).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn registry_with_artifacts(keys: &[&str]) -> (TempDir, ModelRegistry) {
        let dir = TempDir::new().unwrap();
        let registry = ModelRegistry::new(dir.path().to_path_buf());
        for key in keys {
            fs::create_dir_all(registry.tokenizer_dir(key)).unwrap();
        }
        (dir, registry)
    }

    #[test]
    fn test_catalog_keys() {
        assert_eq!(MODEL_CATALOG.len(), 3);
        assert!(spec_for("pricecast-base").is_some());
        assert!(spec_for("pricecast-mini").is_some());
        assert!(spec_for("pricecast-giga").is_none());
        assert_eq!(spec_for(DEFAULT_MODEL_KEY).unwrap().params, "102.3M");
    }

    #[test]
    fn test_backend_availability_tracks_root() {
        let dir = TempDir::new().unwrap();
        let registry = ModelRegistry::new(dir.path().join("missing"));
        assert!(!registry.backend_available());

        let registry = ModelRegistry::new(dir.path().to_path_buf());
        assert!(registry.backend_available());
    }

    #[tokio::test]
    async fn test_load_unknown_key_fails() {
        let (_dir, registry) = registry_with_artifacts(&["pricecast-base"]);
        let err = registry.load("pricecast-giga", "cpu").await.unwrap_err();
        assert!(matches!(err, AppError::ModelLoadFailure(_)));
    }

    #[tokio::test]
    async fn test_load_missing_artifacts_fails() {
        let dir = TempDir::new().unwrap();
        let registry = ModelRegistry::new(dir.path().to_path_buf());

        let err = registry.load("pricecast-base", "cpu").await.unwrap_err();
        assert!(matches!(err, AppError::ModelLoadFailure(_)));
        assert!(registry.current().await.is_none());
    }

    #[tokio::test]
    async fn test_load_and_switch() {
        let (_dir, registry) = registry_with_artifacts(&["pricecast-mini", "pricecast-small"]);

        registry.load("pricecast-mini", "cpu").await.unwrap();
        let current = registry.current().await.unwrap();
        assert_eq!(current.key, "pricecast-mini");
        assert_eq!(current.name, "PriceCast-mini");
        assert_eq!(current.device, "cpu");

        registry.ensure_loaded("pricecast-small", "cpu").await.unwrap();
        assert_eq!(registry.current().await.unwrap().key, "pricecast-small");

        // Same key keeps the slot untouched
        registry.ensure_loaded("pricecast-small", "cpu").await.unwrap();
        assert_eq!(registry.current().await.unwrap().key, "pricecast-small");
    }

    #[tokio::test]
    async fn test_ensure_loaded_falls_back_to_default() {
        let (_dir, registry) = registry_with_artifacts(&[DEFAULT_MODEL_KEY]);

        registry.ensure_loaded("not-a-model", "cpu").await.unwrap();
        assert_eq!(registry.current().await.unwrap().key, DEFAULT_MODEL_KEY);
    }
}
