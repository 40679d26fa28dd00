//! Model loading and single-record inference
//!
//! The engine owns the model artifact for the process lifetime: it is loaded
//! exactly once during startup and never mutated or reloaded afterwards.
//! Loading is fail-fast; an engine that could not load never serves.
//! `predict` is a pure function of the loaded artifact and the input record,
//! so concurrent callers need no coordination.

use crate::artifact::ModelArtifact;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::record::record_to_row;
use crate::response::PredictionResponse;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::sync::OnceLock;

static ENGINE: OnceLock<InferenceEngine> = OnceLock::new();

/// Loaded classifier plus the metadata cached from it at load time.
pub struct InferenceEngine {
    artifact: ModelArtifact,
}

impl InferenceEngine {
    /// Read, decode and validate the artifact file named by `config`.
    pub fn load(config: &EngineConfig) -> EngineResult<Self> {
        let bytes =
            std::fs::read(&config.model_path).map_err(|source| EngineError::ArtifactRead {
                path: config.model_path.clone(),
                source,
            })?;
        let artifact = ModelArtifact::from_fory_slice(&bytes)?;
        let engine = Self::from_artifact(artifact)?;
        tracing::info!(
            path = %config.model_path.display(),
            model = %engine.artifact,
            classes = ?engine.artifact.classes,
            "Loaded premium classifier"
        );
        Ok(engine)
    }

    /// Wrap an already-decoded artifact, running the load-time checks.
    pub fn from_artifact(artifact: ModelArtifact) -> EngineResult<Self> {
        artifact.validate()?;
        Ok(Self { artifact })
    }

    /// Ordered class-label sequence of the loaded model.
    pub fn class_labels(&self) -> &[String] {
        &self.artifact.classes
    }

    /// Semantic version of the loaded model.
    pub fn model_version(&self) -> &str {
        &self.artifact.model_version
    }

    /// Run inference on a single feature record.
    ///
    /// The record is wrapped as a one-row table in the artifact's feature
    /// order, the classifier's prediction and probability-estimation routines
    /// are invoked, and every probability is rounded to 4 decimal places.
    /// Confidence is the maximum rounded class probability.
    pub fn predict(&self, record: &Map<String, Value>) -> EngineResult<PredictionResponse> {
        let row = record_to_row(record, &self.artifact.feature_names)?;
        let class_id = self.artifact.classify(&row)?;
        let probabilities = self.artifact.estimate_probabilities(&row)?;

        let predicted_category = self
            .artifact
            .classes
            .get(class_id)
            .cloned()
            .ok_or_else(|| {
                EngineError::InvalidArtifact(format!("predicted class id {class_id} out of range"))
            })?;

        let mut class_probabilities = IndexMap::with_capacity(probabilities.len());
        let mut confidence: f64 = 0.0;
        for (label, probability) in self.artifact.classes.iter().zip(probabilities) {
            let rounded = round4(probability);
            confidence = confidence.max(rounded);
            class_probabilities.insert(label.clone(), rounded);
        }

        tracing::debug!(category = %predicted_category, confidence, "Prediction served");

        Ok(PredictionResponse {
            predicted_category,
            confidence,
            class_probabilities,
        })
    }
}

/// Round to 4 decimal places.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Load the process-wide engine from `config`.
///
/// Idempotent: once an engine is ready, later calls return it unchanged.
/// On failure no engine is installed and the process cannot serve predictions.
pub fn init(config: &EngineConfig) -> EngineResult<&'static InferenceEngine> {
    if let Some(engine) = ENGINE.get() {
        return Ok(engine);
    }
    let engine = InferenceEngine::load(config)?;
    Ok(ENGINE.get_or_init(|| engine))
}

/// The process-wide engine, if [`init`] has completed.
pub fn try_engine() -> Option<&'static InferenceEngine> {
    ENGINE.get()
}

/// Run inference on a single feature record using the process-wide engine.
pub fn predict_output(record: &Map<String, Value>) -> EngineResult<PredictionResponse> {
    ENGINE
        .get()
        .ok_or(EngineError::Uninitialized)?
        .predict(record)
}
