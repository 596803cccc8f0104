//! Delay prediction model.
//!
//! The model artifact is loaded once at startup and shared read-only by every
//! request. Two artifact formats are supported, picked by file extension:
//! `.json` linear regressions and `.onnx` graphs run through tract.

mod linear;
mod onnx;

pub use linear::LinearDelayModel;
pub use onnx::OnnxDelayModel;

use crate::models::prediction::FeatureRow;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors while evaluating a single row. All of them are caller errors from
/// the API's point of view.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Feature ausente: {0}")]
    MissingFeature(String),
    #[error("Feature '{feature}' não numérica: {value}")]
    NonNumeric { feature: String, value: String },
    #[error("Falha na avaliação do modelo: {0}")]
    Evaluation(String),
}

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to build ONNX plan: {0}")]
    Onnx(String),
    #[error("ONNX models need MODEL_FEATURES to define the input order")]
    MissingFeatureList,
    #[error("linear model has no coefficients")]
    EmptyModel,
    #[error("unsupported model format: {0}")]
    UnsupportedFormat(String),
}

/// A trained regressor mapping one feature row to a delay estimate.
pub trait DelayModel: Send + Sync {
    /// Feature names the model was trained on, in input order.
    fn features(&self) -> &[String];

    /// Raw (unrounded) prediction for one row.
    fn predict(&self, row: &FeatureRow) -> Result<f64, PredictError>;
}

pub type SharedModel = Arc<dyn DelayModel>;

pub fn load_model(path: &Path, features: &[String]) -> Result<SharedModel, ModelLoadError> {
    let model: SharedModel = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Arc::new(LinearDelayModel::from_path(path)?),
        Some("onnx") => Arc::new(OnnxDelayModel::load(path, features.to_vec())?),
        _ => return Err(ModelLoadError::UnsupportedFormat(path.display().to_string())),
    };

    info!(
        "Loaded delay model from {} ({} features)",
        path.display(),
        model.features().len()
    );
    Ok(model)
}

/// Pulls the named features out of `row` in order. Extra keys are ignored.
pub fn feature_vector(row: &FeatureRow, features: &[String]) -> Result<Vec<f64>, PredictError> {
    features
        .iter()
        .map(|name| {
            let value = row
                .get(name)
                .ok_or_else(|| PredictError::MissingFeature(name.clone()))?;
            numeric(value).ok_or_else(|| PredictError::NonNumeric {
                feature: name.clone(),
                value: value.to_string(),
            })
        })
        .collect()
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}
