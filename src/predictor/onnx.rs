use super::{feature_vector, DelayModel, ModelLoadError, PredictError};
use crate::models::prediction::FeatureRow;
use std::path::Path;
use tract_onnx::prelude::*;

type Plan = TypedRunnableModel<TypedModel>;

/// Regressor exported to ONNX (e.g. via skl2onnx). Takes a `[1, n]` f32 input
/// and the first element of the first output is the delay.
pub struct OnnxDelayModel {
    plan: Plan,
    features: Vec<String>,
}

impl OnnxDelayModel {
    pub fn load(path: &Path, features: Vec<String>) -> Result<Self, ModelLoadError> {
        if features.is_empty() {
            return Err(ModelLoadError::MissingFeatureList);
        }

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, features.len()]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| ModelLoadError::Onnx(e.to_string()))?;

        Ok(Self { plan, features })
    }
}

impl DelayModel for OnnxDelayModel {
    fn features(&self) -> &[String] {
        &self.features
    }

    fn predict(&self, row: &FeatureRow) -> Result<f64, PredictError> {
        let x: Vec<f32> = feature_vector(row, &self.features)?
            .into_iter()
            .map(|v| v as f32)
            .collect();

        let input: Tensor = tract_ndarray::Array2::from_shape_vec((1, x.len()), x)
            .map_err(|e| PredictError::Evaluation(e.to_string()))?
            .into();

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| PredictError::Evaluation(e.to_string()))?;

        let first = outputs
            .first()
            .ok_or_else(|| PredictError::Evaluation("model produced no output".to_string()))?;
        let view = first
            .to_array_view::<f32>()
            .map_err(|e| PredictError::Evaluation(e.to_string()))?;

        match view.iter().next() {
            Some(y) if y.is_finite() => Ok(f64::from(*y)),
            Some(y) => Err(PredictError::Evaluation(format!("non-finite output {}", y))),
            None => Err(PredictError::Evaluation("empty output tensor".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_requires_feature_list() {
        let err = OnnxDelayModel::load(Path::new("modelo.onnx"), vec![]).err().unwrap();
        assert!(matches!(err, ModelLoadError::MissingFeatureList));
    }

    #[test]
    fn test_load_missing_file() {
        let err = OnnxDelayModel::load(
            Path::new("does/not/exist.onnx"),
            vec!["hora_pico".to_string()],
        )
        .err()
        .unwrap();
        assert!(matches!(err, ModelLoadError::Onnx(_)));
    }
}
