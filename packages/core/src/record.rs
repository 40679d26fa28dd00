//! Conversion of JSON feature records into model input rows

use crate::error::{EngineError, EngineResult};
use ndarray::Array2;
use serde_json::{Map, Value};

/// Build the one-row feature matrix for a single record, columns in
/// `feature_names` order.
///
/// Values must be JSON numbers; nothing is coerced or defaulted. Keys outside
/// `feature_names` are ignored.
pub fn record_to_row(
    record: &Map<String, Value>,
    feature_names: &[String],
) -> EngineResult<Array2<f64>> {
    let mut flat = Vec::with_capacity(feature_names.len());
    for name in feature_names {
        let value = record
            .get(name)
            .ok_or_else(|| EngineError::MissingFeature(name.clone()))?;
        flat.push(
            value
                .as_f64()
                .ok_or_else(|| EngineError::NonNumericFeature(name.clone()))?,
        );
    }
    let columns = flat.len();
    Array2::from_shape_vec((1, columns), flat)
        .map_err(|e| EngineError::RecordShape(e.to_string()))
}
