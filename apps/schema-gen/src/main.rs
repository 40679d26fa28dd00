//! Schema generation for Underwriter types
//!
//! Writes the JSON Schemas consumed by external serving layers (response
//! validation, documentation examples) into an output directory. The first
//! CLI argument overrides the default `schemas/` target.

use anyhow::{Context, Result};
use schemars::{Schema, schema_for};
use std::fs;
use std::path::{Path, PathBuf};
use underwriter::{EngineConfig, PredictionResponse};

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("schemas"));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    write_schema(&out_dir, "prediction_response.json", &schema_for!(PredictionResponse))?;
    write_schema(&out_dir, "engine_config.json", &schema_for!(EngineConfig))?;

    println!("Schemas written to {}", out_dir.display());
    Ok(())
}

fn write_schema(out_dir: &Path, name: &str, schema: &Schema) -> Result<()> {
    let path = out_dir.join(name);
    let json = serde_json::to_string_pretty(schema)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
