//! Premium category inference for Underwriter
//!
//! Loads a pre-trained insurance-premium classifier from disk once at process
//! start and serves single-record predictions: the predicted category, a
//! confidence score, and the per-class probability distribution. Training
//! happens elsewhere; this crate only binds to the serialized model artifact.

pub mod artifact;
pub mod config;
pub mod engine;
pub mod error;
pub mod record;
pub mod response;


pub use artifact::ModelArtifact;
pub use config::EngineConfig;
pub use engine::{InferenceEngine, init, predict_output, try_engine};
pub use error::{EngineError, EngineResult};
pub use response::PredictionResponse;
