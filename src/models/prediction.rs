use serde::Serialize;
use serde_json::{Map, Value};

/// One input row for the delay model, keyed by feature name.
pub type FeatureRow = Map<String, Value>;

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub previsao_atraso: f64,
}

impl PredictionResponse {
    pub fn from_raw(raw: f64) -> Self {
        Self {
            previsao_atraso: round2(raw),
        }
    }
}

/// Rounds half away from zero to two decimals. Values too large to scale are
/// already whole numbers and come back unchanged.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(round2(-0.004), -0.0);
        assert_eq!(round2(7.0), 7.0);
        assert_eq!(round2(3.14159), 3.14);
    }

    #[test]
    fn test_round2_keeps_huge_values_finite() {
        let huge = 1.75e308;
        assert_eq!(round2(huge), huge);
        assert_eq!(round2(-f64::MAX), -f64::MAX);

        let json = serde_json::to_value(PredictionResponse::from_raw(huge)).unwrap();
        assert_eq!(json["previsao_atraso"].as_f64(), Some(huge));
    }

    #[test]
    fn test_response_shape() {
        let json = serde_json::to_value(PredictionResponse::from_raw(4.567)).unwrap();
        assert_eq!(json, serde_json::json!({ "previsao_atraso": 4.57 }));
    }
}
