//! Response schema for prediction results
//!
//! Declarative contract consumed by an external serving layer to validate
//! outgoing responses and render documentation examples. The library itself
//! also returns this type from [`crate::engine::predict_output`].

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Shape of a single prediction result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PredictionResponse {
    /// The predicted premium category
    #[schemars(example = &"High")]
    pub predicted_category: String,
    /// Model's confidence score for the predicted class (range: 0 to 1)
    #[schemars(example = 0.8432)]
    pub confidence: f64,
    /// Probabilities for each premium category, rounded to 4 decimal places
    /// and keyed in the model's class-label order
    #[schemars(example = serde_json::json!({"Low": 0.01, "Medium": 0.15, "High": 0.84}))]
    pub class_probabilities: IndexMap<String, f64>,
}
