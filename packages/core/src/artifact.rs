//! Serialized classifier artifact and its inference routines
//!
//! The on-disk model is a one-vs-rest ensemble of Platt-calibrated SVMs based on
//! the [`linfa`] crate, stored as a versioned Fory envelope whose payload is the
//! MessagePack encoding of [`ModelArtifact`].

use crate::error::{EngineError, EngineResult};
use linfa::DatasetBase;
use linfa::composing::MultiClassModel;
use linfa::prelude::Pr;
use linfa::traits::Predict;
use linfa_svm::Svm;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format version of the binary artifact envelope.
pub const ARTIFACT_FORMAT_VERSION: u8 = 1;

/// Discriminator for the model family carried by the envelope.
const MODEL_TYPE_SVM_OVR: &str = "SvmOneVsRest";

/// # Pre-trained premium classifier with attached metadata
///
/// Loaded once at startup and treated as immutable for the process lifetime.
/// The trained parameters live inside the `linfa` models; this type only knows
/// how to invoke them.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Semantic version of the trained model, tracked in the model registry.
    pub model_version: String,
    /// Feature columns in the exact order the ensemble was fitted on.
    pub feature_names: Vec<String>,
    /// Ordered class labels; the index is the class id.
    pub classes: Vec<String>,
    /// One Platt-calibrated binary SVM per class id.
    pub ensemble: Vec<(usize, Svm<f64, Pr>)>,
}

impl fmt::Display for ModelArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SVM Classification (One-vs-Rest, {} classes, model v{})",
            self.classes.len(),
            self.model_version
        )
    }
}

impl ModelArtifact {
    /// Serialize the artifact to Fory binary format.
    ///
    /// Uses a wrapper approach: the linfa ensemble is serialized to MessagePack
    /// (fast binary), then wrapped with Fory for schema evolution support.
    pub fn to_fory_vec(&self) -> EngineResult<Vec<u8>> {
        use fory::{Fory, ForyObject};

        // Wrapper struct for Fory serialization
        #[derive(ForyObject)]
        struct ArtifactWrapper {
            version: u8,              // Envelope version for future evolution
            model_type: String,       // Discriminator for the model family
            msgpack_payload: Vec<u8>, // The actual model serialized as MessagePack
        }

        let msgpack_payload = rmp_serde::to_vec(self).map_err(|e| {
            EngineError::ArtifactEncode(format!("MessagePack serialization failed: {e}"))
        })?;

        let wrapper = ArtifactWrapper {
            version: ARTIFACT_FORMAT_VERSION,
            model_type: MODEL_TYPE_SVM_OVR.to_string(),
            msgpack_payload,
        };

        let mut fory = Fory::default().compatible(true);
        fory.register::<ArtifactWrapper>(1).map_err(|e| {
            EngineError::ArtifactEncode(format!("Failed to register ArtifactWrapper: {e}"))
        })?;

        fory.serialize(&wrapper)
            .map_err(|e| EngineError::ArtifactEncode(format!("Fory serialization failed: {e}")))
    }

    /// Deserialize an artifact from Fory binary format.
    pub fn from_fory_slice(bytes: &[u8]) -> EngineResult<Self> {
        use fory::{Fory, ForyObject};

        #[derive(ForyObject)]
        struct ArtifactWrapper {
            version: u8,
            model_type: String,
            msgpack_payload: Vec<u8>,
        }

        let mut fory = Fory::default().compatible(true);
        fory.register::<ArtifactWrapper>(1).map_err(|e| {
            EngineError::ArtifactDecode(format!("Failed to register ArtifactWrapper: {e}"))
        })?;

        let wrapper: ArtifactWrapper = fory
            .deserialize(bytes)
            .map_err(|e| EngineError::ArtifactDecode(format!("Fory deserialization failed: {e}")))?;

        if wrapper.version != ARTIFACT_FORMAT_VERSION {
            return Err(EngineError::ArtifactDecode(format!(
                "Unsupported artifact format version: {}",
                wrapper.version
            )));
        }
        if wrapper.model_type != MODEL_TYPE_SVM_OVR {
            return Err(EngineError::ArtifactDecode(format!(
                "Unsupported model type: {}",
                wrapper.model_type
            )));
        }

        let artifact: ModelArtifact =
            rmp_serde::from_slice(&wrapper.msgpack_payload).map_err(|e| {
                EngineError::ArtifactDecode(format!("MessagePack deserialization failed: {e}"))
            })?;
        Ok(artifact)
    }

    /// Structural checks run once at load time.
    ///
    /// Every class id must be covered by exactly one ensemble member, so the
    /// probability distribution always has one entry per class label.
    pub fn validate(&self) -> EngineResult<()> {
        if self.classes.is_empty() {
            return Err(EngineError::InvalidArtifact(
                "artifact carries no class labels".to_string(),
            ));
        }
        if self.feature_names.is_empty() {
            return Err(EngineError::InvalidArtifact(
                "artifact carries no feature columns".to_string(),
            ));
        }
        if self.ensemble.len() != self.classes.len() {
            return Err(EngineError::InvalidArtifact(format!(
                "ensemble has {} members for {} classes",
                self.ensemble.len(),
                self.classes.len()
            )));
        }
        let mut covered = vec![false; self.classes.len()];
        for (class_id, _) in &self.ensemble {
            match covered.get_mut(*class_id) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(EngineError::InvalidArtifact(format!(
                        "duplicate ensemble member for class id {class_id}"
                    )));
                }
                None => {
                    return Err(EngineError::InvalidArtifact(format!(
                        "ensemble class id {class_id} out of range"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Deterministic class prediction for a single row, as a class id.
    pub fn classify(&self, row: &Array2<f64>) -> EngineResult<usize> {
        let dataset = DatasetBase::from(row.clone());
        let composite = MultiClassModel::from_iter(self.ensemble.clone());
        let predictions = composite.predict(&dataset);
        predictions
            .first()
            .copied()
            .ok_or(EngineError::EmptyPrediction)
    }

    /// Calibrated probability per class id for a single row.
    ///
    /// The per-member Platt scores are normalized so the distribution sums to 1.
    pub fn estimate_probabilities(&self, row: &Array2<f64>) -> EngineResult<Vec<f64>> {
        let dataset = DatasetBase::from(row.clone());
        let mut scores = vec![0.0; self.classes.len()];
        for (class_id, svm) in &self.ensemble {
            let predictions = svm.predict(&dataset);
            let probability = predictions
                .first()
                .copied()
                .ok_or(EngineError::EmptyPrediction)?;
            let slot = scores.get_mut(*class_id).ok_or_else(|| {
                EngineError::InvalidArtifact(format!("ensemble class id {class_id} out of range"))
            })?;
            *slot = f64::from(*probability);
        }

        let total: f64 = scores.iter().sum();
        if total > 0.0 {
            for score in &mut scores {
                *score /= total;
            }
        } else {
            // Degenerate calibration: every member scored zero
            let uniform = 1.0 / scores.len() as f64;
            scores.fill(uniform);
        }
        Ok(scores)
    }
}
