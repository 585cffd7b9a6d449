// src/evaluator/scores.rs — Dimension selection and weighted scores
//
// The six quality dimensions are fixed; only the source of each raw
// value differs between modes. Comparison payloads went through a
// schema change upstream, so each dimension resolves through an
// explicit ordered chain of candidate fields: the current name first,
// then the legacy name where one exists. The chains are data, not
// conditionals, so the precedence is auditable in one place.

use serde::Serialize;

use crate::core::types::{EvaluationMode, RawEvaluation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DimensionKey {
    DefectDetection,
    BusinessCoverage,
    Executability,
    AssertionCompleteness,
    StandardCompliance,
    NonRedundancy,
}

/// Canonical display order.
pub const DIMENSIONS: [DimensionKey; 6] = [
    DimensionKey::DefectDetection,
    DimensionKey::BusinessCoverage,
    DimensionKey::Executability,
    DimensionKey::AssertionCompleteness,
    DimensionKey::StandardCompliance,
    DimensionKey::NonRedundancy,
];

impl DimensionKey {
    pub fn label(self) -> &'static str {
        match self {
            DimensionKey::DefectDetection => "defect detection",
            DimensionKey::BusinessCoverage => "business coverage",
            DimensionKey::Executability => "executability",
            DimensionKey::AssertionCompleteness => "assertion completeness",
            DimensionKey::StandardCompliance => "standard compliance",
            DimensionKey::NonRedundancy => "non-redundancy",
        }
    }

    pub fn weight_percent(self) -> u8 {
        match self {
            DimensionKey::DefectDetection => 25,
            DimensionKey::BusinessCoverage => 20,
            DimensionKey::Executability => 15,
            DimensionKey::AssertionCompleteness => 10,
            DimensionKey::StandardCompliance => 10,
            DimensionKey::NonRedundancy => 20,
        }
    }

    /// Ordered candidate fields for this dimension in the given mode.
    /// Standalone payloads never carry the legacy fields, so their
    /// chains are one element long.
    pub fn candidate_fields(self, mode: EvaluationMode) -> &'static [ScoreField] {
        use ScoreField as F;
        match (self, mode) {
            (Self::DefectDetection, EvaluationMode::Comparison) => {
                &[F::DefectDetection, F::SceneTypeMatch]
            }
            (Self::BusinessCoverage, EvaluationMode::Comparison) => {
                &[F::BusinessCoverage, F::TitleMatch]
            }
            (Self::Executability, EvaluationMode::Comparison) => {
                &[F::Executability, F::StepsMatch]
            }
            (Self::AssertionCompleteness, EvaluationMode::Comparison) => {
                &[F::Assertion, F::ExpectedMatch]
            }
            (Self::DefectDetection, EvaluationMode::Standalone) => &[F::DefectDetection],
            (Self::BusinessCoverage, EvaluationMode::Standalone) => &[F::BusinessCoverage],
            (Self::Executability, EvaluationMode::Standalone) => &[F::Executability],
            (Self::AssertionCompleteness, EvaluationMode::Standalone) => &[F::Assertion],
            // No legacy counterpart in either mode
            (Self::StandardCompliance, _) => &[F::Standard],
            (Self::NonRedundancy, _) => &[F::NonRedundancy],
        }
    }
}

/// The raw payload fields a dimension may read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreField {
    DefectDetection,
    BusinessCoverage,
    Executability,
    Assertion,
    Standard,
    NonRedundancy,
    SceneTypeMatch,
    TitleMatch,
    StepsMatch,
    ExpectedMatch,
}

impl ScoreField {
    fn read(self, raw: &RawEvaluation) -> Option<f64> {
        match self {
            ScoreField::DefectDetection => raw.defect_detection_score,
            ScoreField::BusinessCoverage => raw.business_coverage_score,
            ScoreField::Executability => raw.executability_score,
            ScoreField::Assertion => raw.assertion_score,
            ScoreField::Standard => raw.standard_score,
            ScoreField::NonRedundancy => raw.non_redundancy_score,
            ScoreField::SceneTypeMatch => raw.scene_type_match_score,
            ScoreField::TitleMatch => raw.title_match_score,
            ScoreField::StepsMatch => raw.steps_match_score,
            ScoreField::ExpectedMatch => raw.expected_match_score,
        }
    }
}

/// One dimension of the quality view: fixed label and weight, raw
/// value in [0,100].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScore {
    pub key: DimensionKey,
    pub label: &'static str,
    pub weight_percent: u8,
    pub value: f64,
}

/// Build the six-dimension view for the given mode. A missing or
/// non-numeric field is no evidence for that dimension and resolves to
/// 0; partial payloads never error.
pub fn build_dimensions(raw: &RawEvaluation, mode: EvaluationMode) -> Vec<DimensionScore> {
    DIMENSIONS
        .iter()
        .map(|&key| {
            let value = key
                .candidate_fields(mode)
                .iter()
                .find_map(|f| f.read(raw))
                .filter(|v| v.is_finite())
                .unwrap_or(0.0)
                .clamp(0.0, 100.0);
            DimensionScore {
                key,
                label: key.label(),
                weight_percent: key.weight_percent(),
                value,
            }
        })
        .collect()
}

/// Total score as supplied by the payload. The total is never
/// re-derived from the per-dimension values locally; absent or
/// non-finite totals display as 0.
pub fn total_score(raw: &RawEvaluation) -> f64 {
    raw.total_score
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
        .clamp(0.0, 100.0)
}

/// Three-bucket severity classification used for display tagging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBucket {
    Good,
    Warning,
    Poor,
}

impl std::fmt::Display for ScoreBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreBucket::Good => write!(f, "good"),
            ScoreBucket::Warning => write!(f, "warning"),
            ScoreBucket::Poor => write!(f, "poor"),
        }
    }
}

/// Bucket boundaries are inclusive on the lower edge: >= 80 is good,
/// >= 60 is warning, everything below (and any negative input) is
/// poor. Total over all real inputs.
pub fn score_bucket(value: f64) -> ScoreBucket {
    if value >= 80.0 {
        ScoreBucket::Good
    } else if value >= 60.0 {
        ScoreBucket::Warning
    } else {
        ScoreBucket::Poor
    }
}
