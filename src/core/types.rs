// src/core/types.rs — Core domain types
//
// Wire names follow the evaluation backend's JSON payloads (camelCase:
// `caseId`, `frontEndSteps`, `defectDetectionScore`, ...), so the same
// structs serve both deserialization of backend responses and export.

use serde::{Deserialize, Serialize};

/// Which layer a test case exercises.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SceneType {
    #[default]
    Frontend,
    Backend,
    Integration,
    Exception,
}

impl std::fmt::Display for SceneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneType::Frontend => write!(f, "FRONTEND"),
            SceneType::Backend => write!(f, "BACKEND"),
            SceneType::Integration => write!(f, "INTEGRATION"),
            SceneType::Exception => write!(f, "EXCEPTION"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    P0,
    #[default]
    P1,
    P2,
    P3,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::P0 => write!(f, "P0"),
            Priority::P1 => write!(f, "P1"),
            Priority::P2 => write!(f, "P2"),
            Priority::P3 => write!(f, "P3"),
        }
    }
}

/// A single UI interaction step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrontEndStep {
    pub action: String,
    pub element: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A single API/backend step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackEndStep {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_path: Option<String>,
}

/// A machine-checkable verification point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssertRule {
    pub field: String,
    pub operator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    pub description: String,
}

/// A test case, AI-generated or human-authored. `case_id` is the sole
/// join key across matching and export and is stable for the lifetime
/// of its collection.
///
/// Every field is defaulted so partial payloads always parse; absent
/// optional fields are an empty collection, never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestCase {
    pub case_id: String,
    pub title: String,
    pub module: String,
    pub scene_type: SceneType,
    pub priority: Priority,
    pub pre_condition: Vec<String>,
    pub front_end_steps: Vec<FrontEndStep>,
    pub back_end_steps: Vec<BackEndStep>,
    pub front_end_expected: Vec<String>,
    pub back_end_expected: Vec<String>,
    // `None` (field absent) and `Some(vec![])` are distinct and both
    // survive the JSON round-trip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assert_rules: Option<Vec<AssertRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl TestCase {
    pub fn new(case_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Evaluation mode, decided by the presence of reference cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    Standalone,
    Comparison,
}

impl EvaluationMode {
    pub fn from_reference_count(count: usize) -> Self {
        if count == 0 {
            EvaluationMode::Standalone
        } else {
            EvaluationMode::Comparison
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "standalone" => Some(EvaluationMode::Standalone),
            "comparison" => Some(EvaluationMode::Comparison),
            _ => None,
        }
    }
}

impl std::fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluationMode::Standalone => write!(f, "standalone"),
            EvaluationMode::Comparison => write!(f, "comparison"),
        }
    }
}

/// Raw scoring payload as returned by the evaluation endpoint (or
/// produced by the local heuristic scorer). Every score field is
/// optional: older backends only supplied the legacy `*MatchScore`
/// fields, so the aggregator resolves each dimension through an
/// ordered candidate chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEvaluation {
    pub total_score: Option<f64>,

    pub defect_detection_score: Option<f64>,
    pub business_coverage_score: Option<f64>,
    pub executability_score: Option<f64>,
    pub assertion_score: Option<f64>,
    pub standard_score: Option<f64>,
    pub non_redundancy_score: Option<f64>,

    // Legacy payload shape (narrower scoring model)
    pub scene_type_match_score: Option<f64>,
    pub title_match_score: Option<f64>,
    pub steps_match_score: Option<f64>,
    pub expected_match_score: Option<f64>,

    pub matched_count: Option<u32>,
    pub unmatched_count: Option<u32>,
    #[serde(alias = "matchedCases")]
    pub match_details: Vec<RawMatchDetail>,

    pub overall_analysis: Option<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,

    /// "LLM", "HEURISTIC", or "ERROR".
    pub score_method: Option<String>,
    pub scoring_time_ms: Option<u64>,

    /// Free-form details map; carries `evaluationMode` among others.
    pub score_details: serde_json::Map<String, serde_json::Value>,
}

impl RawEvaluation {
    /// Mode the backend reports for this payload, when it reports one.
    /// Checked in `scoreDetails.evaluationMode` (where the backend puts
    /// it) with a top-level `evaluationMode` accepted as well.
    pub fn reported_mode(&self) -> Option<EvaluationMode> {
        self.score_details
            .get("evaluationMode")
            .and_then(|v| v.as_str())
            .and_then(EvaluationMode::parse)
    }
}

/// One per-reference match record inside a raw payload. Field aliases
/// accept the upstream matcher's original names (`humanCaseId`,
/// `aiCaseId`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMatchDetail {
    #[serde(alias = "humanCaseId")]
    pub reference_case_id: String,
    #[serde(alias = "humanCaseTitle")]
    pub reference_case_title: Option<String>,
    #[serde(alias = "aiCaseId")]
    pub matched_ai_case_id: Option<String>,
    #[serde(alias = "aiCaseTitle")]
    pub matched_ai_case_title: Option<String>,
    pub match_score: Option<f64>,
    pub analysis: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_test_case_new_defaults() {
        let tc = TestCase::new("TC_0001", "Login works");
        assert_eq!(tc.case_id, "TC_0001");
        assert_eq!(tc.title, "Login works");
        assert_eq!(tc.priority, Priority::P1);
        assert_eq!(tc.scene_type, SceneType::Frontend);
        assert!(tc.pre_condition.is_empty());
        assert!(tc.assert_rules.is_none());
        assert!(tc.tags.is_none());
    }

    #[test]
    fn test_partial_payload_parses() {
        // Missing optional fields default, never error
        let tc: TestCase = serde_json::from_str(r#"{"caseId":"TC_0002"}"#).unwrap();
        assert_eq!(tc.case_id, "TC_0002");
        assert!(tc.title.is_empty());
        assert!(tc.front_end_steps.is_empty());
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let tc = TestCase {
            front_end_steps: vec![FrontEndStep {
                action: "click".into(),
                element: "login button".into(),
                value: None,
            }],
            ..TestCase::new("TC_0003", "t")
        };
        let json = serde_json::to_value(&tc).unwrap();
        assert!(json.get("caseId").is_some());
        assert!(json.get("frontEndSteps").is_some());
        assert!(json.get("sceneType").is_some());
        assert_eq!(json["sceneType"], "FRONTEND");
        assert_eq!(json["priority"], "P1");
    }

    #[test]
    fn test_absent_vs_empty_optionals() {
        let absent = TestCase::new("TC_1", "a");
        let empty = TestCase {
            assert_rules: Some(vec![]),
            tags: Some(vec![]),
            ..TestCase::new("TC_1", "a")
        };
        let j_absent = serde_json::to_value(&absent).unwrap();
        let j_empty = serde_json::to_value(&empty).unwrap();
        assert!(j_absent.get("assertRules").is_none());
        assert_eq!(j_empty["assertRules"], serde_json::json!([]));

        let back_absent: TestCase = serde_json::from_value(j_absent).unwrap();
        let back_empty: TestCase = serde_json::from_value(j_empty).unwrap();
        assert_eq!(back_absent, absent);
        assert_eq!(back_empty, empty);
        assert_ne!(back_absent, back_empty);
    }

    #[test]
    fn test_raw_evaluation_legacy_aliases() {
        let raw: RawEvaluation = serde_json::from_str(
            r#"{
                "totalScore": 72.5,
                "sceneTypeMatchScore": 60,
                "matchedCases": [
                    {"humanCaseId": "REF_1", "aiCaseId": "TC_0001", "matchScore": 88}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(raw.total_score, Some(72.5));
        assert_eq!(raw.scene_type_match_score, Some(60.0));
        assert_eq!(raw.match_details.len(), 1);
        assert_eq!(raw.match_details[0].reference_case_id, "REF_1");
        assert_eq!(raw.match_details[0].matched_ai_case_id.as_deref(), Some("TC_0001"));
    }

    #[test]
    fn test_reported_mode_from_score_details() {
        let raw: RawEvaluation = serde_json::from_str(
            r#"{"scoreDetails": {"evaluationMode": "standalone", "aiCaseCount": 4}}"#,
        )
        .unwrap();
        assert_eq!(raw.reported_mode(), Some(EvaluationMode::Standalone));

        let none: RawEvaluation = serde_json::from_str("{}").unwrap();
        assert_eq!(none.reported_mode(), None);
    }

    #[test]
    fn test_mode_from_reference_count() {
        assert_eq!(
            EvaluationMode::from_reference_count(0),
            EvaluationMode::Standalone
        );
        assert_eq!(
            EvaluationMode::from_reference_count(3),
            EvaluationMode::Comparison
        );
    }
}
