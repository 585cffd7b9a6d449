// src/evaluator/report.rs — Raw payload to presentation-ready report

use serde::Serialize;
use tracing::warn;

use crate::core::store::CaseStore;
use crate::core::types::{EvaluationMode, RawEvaluation};
use crate::evaluator::scores::{build_dimensions, score_bucket, total_score, DimensionScore};

/// One per-reference match row, ids normalized and titles backfilled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetail {
    pub reference_case_id: String,
    pub reference_case_title: Option<String>,
    pub matched: bool,
    pub match_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_ai_case_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_ai_case_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

/// Presentation-ready evaluation report. Scores are resolved through
/// the dimension chains, match rows are normalized, and the mode is the
/// one the payload reports (falling back to the one the caller
/// requested).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub mode: EvaluationMode,
    pub total_score: f64,
    pub dimensions: Vec<DimensionScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unmatched_count: Option<u32>,
    pub match_details: Vec<MatchDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_analysis: Option<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub score_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring_time_ms: Option<u64>,
}

/// Build the report for a raw payload against the store it was scored
/// from. The payload's own `evaluationMode` wins when present; a
/// payload scored in comparison mode must render as comparison even if
/// the caller would have asked for standalone, and vice versa.
pub fn build_report(raw: &RawEvaluation, store: &CaseStore) -> ComparisonResult {
    let mode = raw.reported_mode().unwrap_or_else(|| store.requested_mode());
    let dimensions = build_dimensions(raw, mode);
    let total = total_score(raw);

    let match_details = match mode {
        EvaluationMode::Comparison => build_match_details(raw, store),
        EvaluationMode::Standalone => Vec::new(),
    };

    let (matched_count, unmatched_count) = match mode {
        EvaluationMode::Comparison => {
            let counts = resolve_counts(raw, store, &match_details);
            (Some(counts.0), Some(counts.1))
        }
        EvaluationMode::Standalone => (None, None),
    };

    ComparisonResult {
        mode,
        total_score: total,
        dimensions,
        matched_count,
        unmatched_count,
        match_details,
        overall_analysis: raw.overall_analysis.clone(),
        strengths: raw.strengths.clone(),
        weaknesses: raw.weaknesses.clone(),
        suggestions: raw.suggestions.clone(),
        score_method: raw.score_method.clone().unwrap_or_else(|| "LLM".into()),
        scoring_time_ms: raw.scoring_time_ms,
    }
}

fn build_match_details(raw: &RawEvaluation, store: &CaseStore) -> Vec<MatchDetail> {
    raw.match_details
        .iter()
        .map(|d| {
            let ai_id = normalize_case_id(d.matched_ai_case_id.as_deref());
            let reference_case_title = d
                .reference_case_title
                .clone()
                .filter(|t| !t.trim().is_empty())
                .or_else(|| {
                    store
                        .reference_by_id(&d.reference_case_id)
                        .map(|c| c.title.clone())
                });
            let matched_ai_case_title = d
                .matched_ai_case_title
                .clone()
                .filter(|t| !t.trim().is_empty())
                .or_else(|| {
                    ai_id
                        .as_deref()
                        .and_then(|id| store.ai_by_id(id))
                        .map(|c| c.title.clone())
                });
            MatchDetail {
                reference_case_id: d.reference_case_id.clone(),
                reference_case_title,
                matched: ai_id.is_some(),
                match_score: d
                    .match_score
                    .filter(|v| v.is_finite())
                    .unwrap_or(0.0)
                    .clamp(0.0, 100.0),
                matched_ai_case_id: ai_id,
                matched_ai_case_title,
                analysis: d.analysis.clone(),
            }
        })
        .collect()
}

/// An AI-case id counts as a real match only when it is non-empty
/// after trimming and not the literal string "null" (the upstream
/// matcher emits that for unmatched references).
fn normalize_case_id(id: Option<&str>) -> Option<String> {
    let id = id?.trim();
    if id.is_empty() || id.eq_ignore_ascii_case("null") {
        return None;
    }
    Some(id.to_string())
}

/// Counts from the payload when it supplies both; otherwise derived
/// from the normalized rows. Either way a mismatch against the
/// reference collection is logged but accepted as-is.
fn resolve_counts(raw: &RawEvaluation, store: &CaseStore, details: &[MatchDetail]) -> (u32, u32) {
    let (matched, unmatched) = match (raw.matched_count, raw.unmatched_count) {
        (Some(m), Some(u)) => (m, u),
        _ => {
            let matched = details.iter().filter(|d| d.matched).count() as u32;
            let total = store.reference_cases().len() as u32;
            (matched, total.saturating_sub(matched))
        }
    };

    let reference_total = store.reference_cases().len() as u32;
    if matched + unmatched != reference_total {
        warn!(
            matched,
            unmatched, reference_total, "match counts disagree with reference collection"
        );
    }
    (matched, unmatched)
}

/// Plain-text rendering for terminal output.
pub fn render_text_report(result: &ComparisonResult) -> String {
    let mut out = String::new();

    out.push_str("=== Evaluation Report ===\n");
    out.push_str(&format!("Mode:   {}\n", result.mode));
    out.push_str(&format!("Method: {}\n", result.score_method));
    if let Some(ms) = result.scoring_time_ms {
        out.push_str(&format!("Took:   {ms} ms\n"));
    }
    out.push_str(&format!(
        "\nTotal score: {:.1} [{}]\n\n",
        result.total_score,
        score_bucket(result.total_score)
    ));

    for dim in &result.dimensions {
        out.push_str(&format!(
            "  {:<24} {:>6.1}  (weight {:>2}%) [{}]\n",
            dim.label,
            dim.value,
            dim.weight_percent,
            score_bucket(dim.value)
        ));
    }

    if result.mode == EvaluationMode::Comparison {
        if let (Some(matched), Some(unmatched)) = (result.matched_count, result.unmatched_count) {
            out.push_str(&format!(
                "\nMatched {matched} of {} reference cases ({unmatched} unmatched)\n",
                matched + unmatched
            ));
        }
        for detail in &result.match_details {
            let title = detail.reference_case_title.as_deref().unwrap_or("(untitled)");
            if detail.matched {
                let ai = detail.matched_ai_case_id.as_deref().unwrap_or("?");
                out.push_str(&format!(
                    "  [x] {} {title} -> {ai} ({:.0})\n",
                    detail.reference_case_id, detail.match_score
                ));
            } else {
                out.push_str(&format!(
                    "  [ ] {} {title} (no match)\n",
                    detail.reference_case_id
                ));
            }
        }
    }

    if let Some(analysis) = &result.overall_analysis {
        out.push_str(&format!("\n{analysis}\n"));
    }
    push_section(&mut out, "Strengths", &result.strengths);
    push_section(&mut out, "Weaknesses", &result.weaknesses);
    push_section(&mut out, "Suggestions", &result.suggestions);

    out
}

fn push_section(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n{heading}:\n"));
    for item in items {
        out.push_str(&format!("  - {item}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{RawMatchDetail, TestCase};
    use pretty_assertions::assert_eq;

    fn comparison_store() -> CaseStore {
        CaseStore::new(
            vec![
                TestCase::new("TC_0001", "login succeeds"),
                TestCase::new("TC_0002", "logout succeeds"),
            ],
            vec![
                TestCase::new("REF_1", "login succeeds"),
                TestCase::new("REF_2", "password reset works"),
            ],
        )
    }

    #[test]
    fn test_reported_mode_wins_over_requested() {
        // Store would request comparison, payload says standalone
        let raw: RawEvaluation = serde_json::from_str(
            r#"{"totalScore": 50, "scoreDetails": {"evaluationMode": "standalone"}}"#,
        )
        .unwrap();
        let report = build_report(&raw, &comparison_store());
        assert_eq!(report.mode, EvaluationMode::Standalone);
        assert!(report.match_details.is_empty());
        assert_eq!(report.matched_count, None);
        assert_eq!(report.unmatched_count, None);
    }

    #[test]
    fn test_requested_mode_used_when_unreported() {
        let raw = RawEvaluation::default();
        let report = build_report(&raw, &comparison_store());
        assert_eq!(report.mode, EvaluationMode::Comparison);
    }

    #[test]
    fn test_null_and_blank_ai_ids_are_unmatched() {
        let raw = RawEvaluation {
            match_details: vec![
                RawMatchDetail {
                    reference_case_id: "REF_1".into(),
                    matched_ai_case_id: Some("TC_0001".into()),
                    match_score: Some(90.0),
                    ..Default::default()
                },
                RawMatchDetail {
                    reference_case_id: "REF_2".into(),
                    matched_ai_case_id: Some("null".into()),
                    ..Default::default()
                },
                RawMatchDetail {
                    reference_case_id: "REF_3".into(),
                    matched_ai_case_id: Some("   ".into()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let report = build_report(&raw, &comparison_store());
        assert!(report.match_details[0].matched);
        assert!(!report.match_details[1].matched);
        assert!(!report.match_details[2].matched);
        assert_eq!(report.match_details[1].matched_ai_case_id, None);
    }

    #[test]
    fn test_titles_backfilled_from_store() {
        let raw = RawEvaluation {
            match_details: vec![RawMatchDetail {
                reference_case_id: "REF_1".into(),
                matched_ai_case_id: Some("TC_0001".into()),
                match_score: Some(100.0),
                ..Default::default()
            }],
            ..Default::default()
        };
        let report = build_report(&raw, &comparison_store());
        let detail = &report.match_details[0];
        assert_eq!(detail.reference_case_title.as_deref(), Some("login succeeds"));
        assert_eq!(detail.matched_ai_case_title.as_deref(), Some("login succeeds"));
    }

    #[test]
    fn test_payload_titles_preferred_over_store() {
        let raw = RawEvaluation {
            match_details: vec![RawMatchDetail {
                reference_case_id: "REF_1".into(),
                reference_case_title: Some("payload title".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let report = build_report(&raw, &comparison_store());
        assert_eq!(
            report.match_details[0].reference_case_title.as_deref(),
            Some("payload title")
        );
    }

    #[test]
    fn test_counts_prefer_payload_pair() {
        let raw = RawEvaluation {
            matched_count: Some(1),
            unmatched_count: Some(1),
            ..Default::default()
        };
        let report = build_report(&raw, &comparison_store());
        assert_eq!(report.matched_count, Some(1));
        assert_eq!(report.unmatched_count, Some(1));
    }

    #[test]
    fn test_counts_derived_when_payload_incomplete() {
        let raw = RawEvaluation {
            matched_count: Some(1), // no unmatched_count: derive both
            match_details: vec![RawMatchDetail {
                reference_case_id: "REF_1".into(),
                matched_ai_case_id: Some("TC_0001".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let report = build_report(&raw, &comparison_store());
        assert_eq!(report.matched_count, Some(1));
        assert_eq!(report.unmatched_count, Some(1));
    }

    #[test]
    fn test_score_method_defaults_to_llm() {
        let report = build_report(&RawEvaluation::default(), &comparison_store());
        assert_eq!(report.score_method, "LLM");

        let raw = RawEvaluation {
            score_method: Some("HEURISTIC".into()),
            ..Default::default()
        };
        let report = build_report(&raw, &comparison_store());
        assert_eq!(report.score_method, "HEURISTIC");
    }

    #[test]
    fn test_match_score_guarded() {
        let raw = RawEvaluation {
            match_details: vec![RawMatchDetail {
                reference_case_id: "REF_1".into(),
                match_score: Some(f64::NAN),
                ..Default::default()
            }],
            ..Default::default()
        };
        let report = build_report(&raw, &comparison_store());
        assert_eq!(report.match_details[0].match_score, 0.0);
    }

    #[test]
    fn test_text_report_contains_dimensions_and_total() {
        let raw: RawEvaluation = serde_json::from_str(
            r#"{"totalScore": 85, "defectDetectionScore": 90, "strengths": ["solid coverage"]}"#,
        )
        .unwrap();
        let report = build_report(&raw, &comparison_store());
        let text = render_text_report(&report);
        assert!(text.contains("Total score: 85.0 [good]"));
        assert!(text.contains("defect detection"));
        assert!(text.contains("Strengths:"));
        assert!(text.contains("- solid coverage"));
    }
}
