use serde::{
    Deserialize,
    Serialize,
};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskClass {
    Low,
    High,
}

impl RiskClass {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(RiskClass::Low),
            1 => Some(RiskClass::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionEntry {
    pub feature: String,
    #[serde(rename = "importance")]
    pub weight_percent: f64,
    #[serde(rename = "impact")]
    pub direction: Direction,
}

/// Wire shape returned by the predictor. Every key is optional here so that
/// partial payloads can be told apart from transport errors.
#[derive(Debug, Default, Deserialize)]
struct RawPrediction {
    prediction: Option<serde_json::Value>,
    probability: Option<serde_json::Value>,
    importance: Option<Vec<ContributionEntry>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub id: Uuid,
    pub received_at: chrono::DateTime<chrono::Local>,
    pub classification: RiskClass,
    pub risk_percentage: f64,
    pub contributions: Vec<ContributionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncompleteReason {
    Absent,
    Malformed(String),
    MissingContributions,
    UnknownClassification,
    RequestFailed(String),
}

impl IncompleteReason {
    pub fn describe(&self) -> String {
        match self {
            IncompleteReason::Absent => "No result was returned.".to_string(),
            IncompleteReason::Malformed(detail) => format!("The result was malformed: {detail}"),
            IncompleteReason::MissingContributions => {
                "The result did not include contribution factors.".to_string()
            }
            IncompleteReason::UnknownClassification => {
                "The result carried an unknown risk classification.".to_string()
            }
            IncompleteReason::RequestFailed(detail) => format!("The request failed: {detail}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Complete(PredictionResult),
    Incomplete(IncompleteReason),
}

impl PredictionOutcome {
    pub fn from_json(payload: Option<serde_json::Value>) -> Self {
        let payload = match payload {
            None | Some(serde_json::Value::Null) => {
                return PredictionOutcome::Incomplete(IncompleteReason::Absent)
            }
            Some(payload) => payload,
        };

        let raw: RawPrediction = match serde_json::from_value(payload) {
            Ok(raw) => raw,
            Err(e) => return PredictionOutcome::Incomplete(IncompleteReason::Malformed(e.to_string())),
        };

        let contributions = match raw.importance {
            Some(entries) if !entries.is_empty() => entries,
            _ => return PredictionOutcome::Incomplete(IncompleteReason::MissingContributions),
        };

        let classification = match raw
            .prediction
            .as_ref()
            .and_then(class_code)
            .and_then(RiskClass::from_code)
        {
            Some(class) => class,
            None => return PredictionOutcome::Incomplete(IncompleteReason::UnknownClassification),
        };

        // A missing or non-numeric probability leaves the gauge at zero.
        let risk_percentage = raw
            .probability
            .as_ref()
            .and_then(|value| value.as_f64())
            .filter(|value| value.is_finite())
            .map(|value| value.clamp(0.0, 100.0))
            .unwrap_or(0.0);

        PredictionOutcome::Complete(PredictionResult {
            id: Uuid::new_v4(),
            received_at: chrono::Local::now(),
            classification,
            risk_percentage,
            contributions,
        })
    }

    pub fn failed(message: impl Into<String>) -> Self {
        PredictionOutcome::Incomplete(IncompleteReason::RequestFailed(message.into()))
    }
}

/// `1` and `1.0` are the same class; fractional codes are not.
fn class_code(value: &serde_json::Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value.as_f64().filter(|code| code.is_finite() && code.fract() == 0.0).map(|code| code as i64)
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn complete(outcome: PredictionOutcome) -> PredictionResult {
        match outcome {
            PredictionOutcome::Complete(result) => result,
            other => panic!("Expected Complete, got {:?}", other),
        }
    }

    #[test]
    fn test_parses_collaborator_payload() {
        let result = complete(PredictionOutcome::from_json(Some(json!({
            "prediction": 1,
            "probability": 72.4,
            "importance": [
                { "feature": "ap_hi", "importance": 32, "impact": "Positive" },
                { "feature": "active", "importance": 18, "impact": "Negative" }
            ]
        }))));

        assert_eq!(result.classification, RiskClass::High);
        assert_eq!(result.risk_percentage, 72.4);
        assert_eq!(result.contributions.len(), 2);
        assert_eq!(result.contributions[0].feature, "ap_hi");
        assert_eq!(result.contributions[1].direction, Direction::Negative);
    }

    #[test]
    fn test_float_classification_codes() {
        let payload = |code: f64| {
            Some(json!({
                "prediction": code,
                "probability": 72.0,
                "importance": [{ "feature": "ap_hi", "importance": 32.0, "impact": "Positive" }]
            }))
        };

        assert_eq!(complete(PredictionOutcome::from_json(payload(1.0))).classification, RiskClass::High);
        assert_eq!(complete(PredictionOutcome::from_json(payload(0.0))).classification, RiskClass::Low);
        assert_eq!(
            PredictionOutcome::from_json(payload(0.5)),
            PredictionOutcome::Incomplete(IncompleteReason::UnknownClassification)
        );
    }

    #[test]
    fn test_each_result_gets_a_fresh_id() {
        let payload = json!({
            "prediction": 0,
            "probability": 10,
            "importance": [{ "feature": "age", "importance": 5, "impact": "Positive" }]
        });
        let a = complete(PredictionOutcome::from_json(Some(payload.clone())));
        let b = complete(PredictionOutcome::from_json(Some(payload)));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_absent_and_missing_contributions_are_incomplete() {
        assert_eq!(
            PredictionOutcome::from_json(None),
            PredictionOutcome::Incomplete(IncompleteReason::Absent)
        );
        assert_eq!(
            PredictionOutcome::from_json(Some(serde_json::Value::Null)),
            PredictionOutcome::Incomplete(IncompleteReason::Absent)
        );
        assert_eq!(
            PredictionOutcome::from_json(Some(json!({ "prediction": 0, "probability": 12 }))),
            PredictionOutcome::Incomplete(IncompleteReason::MissingContributions)
        );
        assert_eq!(
            PredictionOutcome::from_json(Some(json!({ "prediction": 0, "importance": [] }))),
            PredictionOutcome::Incomplete(IncompleteReason::MissingContributions)
        );
    }

    #[test]
    fn test_malformed_shapes_are_incomplete() {
        let bad_direction = PredictionOutcome::from_json(Some(json!({
            "prediction": 0,
            "importance": [{ "feature": "age", "importance": 5, "impact": "Sideways" }]
        })));
        assert!(matches!(bad_direction, PredictionOutcome::Incomplete(IncompleteReason::Malformed(_))));

        let not_an_object = PredictionOutcome::from_json(Some(json!([1, 2, 3])));
        assert!(matches!(not_an_object, PredictionOutcome::Incomplete(IncompleteReason::Malformed(_))));

        let bad_class = PredictionOutcome::from_json(Some(json!({
            "prediction": 7,
            "importance": [{ "feature": "age", "importance": 5, "impact": "Positive" }]
        })));
        assert_eq!(bad_class, PredictionOutcome::Incomplete(IncompleteReason::UnknownClassification));
    }

    #[test]
    fn test_probability_is_clamped_or_defaulted() {
        let entries = json!([{ "feature": "age", "importance": 5, "impact": "Positive" }]);

        let over = complete(PredictionOutcome::from_json(Some(
            json!({ "prediction": 1, "probability": 140, "importance": entries.clone() }),
        )));
        assert_eq!(over.risk_percentage, 100.0);

        let missing =
            complete(PredictionOutcome::from_json(Some(json!({ "prediction": 0, "importance": entries }))));
        assert_eq!(missing.risk_percentage, 0.0);
    }
}
