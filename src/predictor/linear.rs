use super::{feature_vector, DelayModel, ModelLoadError, PredictError};
use crate::models::prediction::FeatureRow;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Linear regression exported as JSON:
/// `{"intercept": 1.2, "coefficients": {"hora": 0.3, ...}}`.
#[derive(Debug, Clone)]
pub struct LinearDelayModel {
    intercept: f64,
    features: Vec<String>,
    weights: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct LinearArtifact {
    intercept: f64,
    coefficients: BTreeMap<String, f64>,
}

impl LinearDelayModel {
    pub fn new(
        intercept: f64,
        coefficients: impl IntoIterator<Item = (String, f64)>,
    ) -> Result<Self, ModelLoadError> {
        let (features, weights): (Vec<String>, Vec<f64>) = coefficients.into_iter().unzip();
        if features.is_empty() {
            return Err(ModelLoadError::EmptyModel);
        }
        Ok(Self {
            intercept,
            features,
            weights,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelLoadError> {
        let artifact: LinearArtifact = serde_json::from_str(raw)?;
        Self::new(artifact.intercept, artifact.coefficients)
    }

    pub fn from_path(path: &Path) -> Result<Self, ModelLoadError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

impl DelayModel for LinearDelayModel {
    fn features(&self) -> &[String] {
        &self.features
    }

    fn predict(&self, row: &FeatureRow) -> Result<f64, PredictError> {
        let x = feature_vector(row, &self.features)?;
        let y = self.intercept
            + x.iter()
                .zip(&self.weights)
                .map(|(value, weight)| value * weight)
                .sum::<f64>();

        if y.is_finite() {
            Ok(y)
        } else {
            Err(PredictError::Evaluation(format!("non-finite output {}", y)))
        }
    }
}
