//! Configuration for the inference engine

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the inference engine
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EngineConfig {
    /// Path of the serialized model artifact, read once at startup
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/premium.uwmodel")
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self {
            model_path: std::env::var("UNDERWRITER_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_model_path()),
        }
    }
}
