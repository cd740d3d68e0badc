// ML model loader and cache utilities
// Handles download-once caching of the hand-landmark model asset

use std::fs;
use std::path::{Path, PathBuf};

/// Model source configuration
#[derive(Debug, Clone)]
pub enum ModelSource {
    /// Local file path
    LocalFile(PathBuf),
    /// Direct URL
    Url(String),
}

/// ML model metadata
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub name: String,
    pub version: String,
    pub source: ModelSource,
    pub size_bytes: Option<u64>,
}

/// Model manager for caching and loading ML models
pub struct ModelManager {
    cache_dir: PathBuf,
}

impl ModelManager {
    /// Create a new model manager with cache directory
    pub fn new(cache_dir: PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    /// Manager rooted at the default cache location under the home directory
    pub fn with_default_cache() -> Result<Self, Box<dyn std::error::Error>> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| "Could not determine home directory")?;

        let mut path = PathBuf::from(home);
        path.push(".handwave");
        path.push("models");
        Self::new(path)
    }

    /// Get the cache directory path
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Check if a model is cached
    pub fn is_cached(&self, model: &ModelInfo) -> bool {
        self.get_model_path(&model.name).exists()
    }

    /// Get the local path for a model
    pub fn get_model_path(&self, model_name: &str) -> PathBuf {
        self.cache_dir.join(model_name)
    }

    /// Download a model if not cached, returning its local path
    pub fn ensure_model(&self, model: &ModelInfo) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let model_path = self.get_model_path(&model.name);

        if self.is_cached(model) {
            println!("Model {} already cached at {:?}", model.name, model_path);
            return Ok(model_path);
        }

        println!("Downloading model {} from {:?}", model.name, model.source);

        match &model.source {
            ModelSource::LocalFile(path) => {
                fs::copy(path, &model_path)?;
            }
            ModelSource::Url(url) => {
                let response = reqwest::blocking::get(url)?.error_for_status()?;
                let bytes = response.bytes()?;
                fs::write(&model_path, &bytes)?;
                println!("Downloaded {} bytes to {:?}", bytes.len(), model_path);
            }
        }

        Ok(model_path)
    }

    /// Clear the model cache
    pub fn clear_cache(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    /// Get cache size in bytes
    pub fn get_cache_size(&self) -> Result<u64, Box<dyn std::error::Error>> {
        let mut total_size = 0u64;

        if self.cache_dir.exists() {
            for entry in fs::read_dir(&self.cache_dir)? {
                let entry = entry?;
                let metadata = entry.metadata()?;
                if metadata.is_file() {
                    total_size += metadata.len();
                }
            }
        }

        Ok(total_size)
    }
}

// ==============================================================================
// Predefined Model Configurations
// ==============================================================================

/// MediaPipe model configurations
pub mod mediapipe {
    use super::*;

    pub fn hand_landmarker() -> ModelInfo {
        ModelInfo {
            name: "mediapipe-hands.task".to_string(),
            version: "v1".to_string(),
            source: ModelSource::Url(
                "https://storage.googleapis.com/mediapipe-models/hand_landmarker/hand_landmarker/float16/latest/hand_landmarker.task".to_string()
            ),
            size_bytes: Some(10_000_000), // ~10 MB
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_manager_creation() {
        let temp_dir = std::env::temp_dir().join("handwave_test_models");
        let manager = ModelManager::new(temp_dir.clone()).unwrap();
        assert_eq!(manager.cache_dir(), temp_dir.as_path());
    }

    #[test]
    fn test_hand_landmarker_model_info() {
        let hands = mediapipe::hand_landmarker();
        assert_eq!(hands.name, "mediapipe-hands.task");
        assert!(hands.size_bytes.unwrap() > 0);
        assert!(matches!(hands.source, ModelSource::Url(_)));
    }

    #[test]
    fn test_local_file_source_is_copied() {
        let temp_dir = std::env::temp_dir().join("handwave_test_models_copy");
        let _ = fs::remove_dir_all(&temp_dir);
        let manager = ModelManager::new(temp_dir.clone()).unwrap();

        let source_path = temp_dir.join("source.task");
        fs::write(&source_path, b"model bytes").unwrap();

        let model = ModelInfo {
            name: "local.task".to_string(),
            version: "v1".to_string(),
            source: ModelSource::LocalFile(source_path),
            size_bytes: None,
        };

        let cached = manager.ensure_model(&model).unwrap();
        assert_eq!(fs::read(cached).unwrap(), b"model bytes");
        assert!(manager.is_cached(&model));
        assert!(manager.get_cache_size().unwrap() > 0);

        let _ = fs::remove_dir_all(&temp_dir);
    }
}
