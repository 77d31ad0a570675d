use serde::Deserialize;
use serde_json::Map;

use super::table::format_confidence;

/// Single-candidate prediction returned for manually entered values.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ManualPrediction {
    pub prediction: String,
    pub confidence: f64,
    /// Per-class probabilities in the order the backend listed them.
    #[serde(default)]
    pub probabilities: Option<Map<String, serde_json::Value>>,
}

/// Coarse tone for the manual result headline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultTone {
    Success,
    Warning,
    Danger,
}

impl ResultTone {
    /// Substring match so variants like `"CONFIRMED (high)"` still count.
    pub fn for_prediction(prediction: &str) -> ResultTone {
        if prediction.contains("CONFIRMED") || prediction.contains("Confirmed Planet") {
            ResultTone::Success
        } else if prediction.contains("CANDIDATE") || prediction.contains("Planet Candidate") {
            ResultTone::Warning
        } else {
            ResultTone::Danger
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilityView {
    pub class_name: String,
    /// Fraction in `[0, 1]` for bar widths.
    pub fraction: f32,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ManualResultView {
    pub prediction: String,
    pub tone: ResultTone,
    pub confidence: String,
    pub probabilities: Vec<ProbabilityView>,
}

impl ManualPrediction {
    pub fn render(&self) -> ManualResultView {
        let probabilities = self
            .probabilities
            .iter()
            .flatten()
            .filter_map(|(class_name, value)| {
                let probability = value.as_f64()?;
                Some(ProbabilityView {
                    class_name: class_name.clone(),
                    fraction: probability.clamp(0.0, 1.0) as f32,
                    label: format_confidence(probability),
                })
            })
            .collect();
        ManualResultView {
            prediction: self.prediction.clone(),
            tone: ResultTone::for_prediction(&self.prediction),
            confidence: format_confidence(self.confidence),
            probabilities,
        }
    }
}
