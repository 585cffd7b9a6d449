// src/evaluator/heuristic.rs — Offline rule-based scorer
//
// Keyword and structure checks over the cases themselves; no network,
// no model. Produces the same payload shape as the evaluation endpoint
// with `scoreMethod: "HEURISTIC"`, so the rest of the pipeline treats
// both sources identically. Only ever invoked explicitly; an endpoint
// failure is surfaced, not silently replaced by this scorer.

use std::collections::HashSet;

use serde_json::{json, Map};
use tracing::debug;

use crate::core::store::CaseStore;
use crate::core::types::{
    EvaluationMode, RawEvaluation, RawMatchDetail, SceneType, TestCase,
};
use crate::evaluator::matcher;

const BOUNDARY_KEYWORDS: &[&str] = &[
    "boundary", "empty", "maximum", "minimum", "max", "min", "limit", "overflow", "zero",
    "exceed", "overlong",
];

const EXCEPTION_KEYWORDS: &[&str] = &[
    "fail", "error", "exception", "timeout", "invalid", "unauthorized", "denied", "reject",
    "expired", "interrupt", "wrong",
];

/// Step actions too vague to execute without guessing.
const VAGUE_STEP_KEYWORDS: &[&str] = &["some", "appropriate", "relevant", "properly", "etc"];

/// Score the store's AI cases without a server. Reference cases, when
/// present, only drive matching and coverage; the dimension scores are
/// always derived from the AI cases themselves.
pub fn evaluate(store: &CaseStore, prd_text: &str) -> RawEvaluation {
    let mode = store.requested_mode();
    let cases = store.ai_cases();

    if cases.is_empty() {
        return empty_result(mode);
    }

    let defect = defect_detection(cases);
    let business = business_coverage(cases);
    let exec = executability(cases);
    let assertion = assertion_completeness(cases);
    let standard = standard_compliance(cases);
    let non_redundancy = non_redundancy(cases);

    let total = defect * 0.25
        + business * 0.20
        + exec * 0.15
        + assertion * 0.10
        + standard * 0.10
        + non_redundancy * 0.20;

    debug!(
        total,
        defect, business, exec, assertion, standard, non_redundancy, "heuristic scores"
    );

    let dims = [
        ("defect detection", defect),
        ("business coverage", business),
        ("executability", exec),
        ("assertion completeness", assertion),
        ("standard compliance", standard),
        ("non-redundancy", non_redundancy),
    ];
    let strengths: Vec<String> = dims
        .iter()
        .filter(|(_, v)| *v >= 80.0)
        .map(|(label, _)| format!("strong {label}"))
        .collect();
    let weaknesses: Vec<String> = dims
        .iter()
        .filter(|(_, v)| *v < 60.0)
        .map(|(label, v)| format!("weak {label} ({v:.0})"))
        .collect();
    let suggestions = suggestions_for(&dims);

    let mut score_details = Map::new();
    score_details.insert("evaluationMode".into(), json!(mode.to_string()));
    score_details.insert("aiCaseCount".into(), json!(cases.len()));
    score_details.insert("refCaseCount".into(), json!(store.reference_cases().len()));
    score_details.insert("hasPrdContext".into(), json!(!prd_text.trim().is_empty()));

    let (matched_count, unmatched_count, match_details) = match mode {
        EvaluationMode::Comparison => {
            let details = match_references(store);
            let matched = details.iter().filter(|d| d.matched_ai_case_id.is_some()).count() as u32;
            let unmatched = store.reference_cases().len() as u32 - matched;
            let rate = matcher::coverage_rate(store.reference_cases(), cases);
            score_details.insert("coverageRate".into(), json!(rate));
            (Some(matched), Some(unmatched), details)
        }
        EvaluationMode::Standalone => (None, None, Vec::new()),
    };

    RawEvaluation {
        total_score: Some(total),
        defect_detection_score: Some(defect),
        business_coverage_score: Some(business),
        executability_score: Some(exec),
        assertion_score: Some(assertion),
        standard_score: Some(standard),
        non_redundancy_score: Some(non_redundancy),
        matched_count,
        unmatched_count,
        match_details,
        overall_analysis: Some(format!(
            "Rule-based evaluation of {} cases in {} mode.",
            cases.len(),
            mode
        )),
        strengths,
        weaknesses,
        suggestions,
        score_method: Some("HEURISTIC".into()),
        score_details,
        ..Default::default()
    }
}

fn empty_result(mode: EvaluationMode) -> RawEvaluation {
    let mut score_details = Map::new();
    score_details.insert("evaluationMode".into(), json!(mode.to_string()));
    score_details.insert("aiCaseCount".into(), json!(0));
    RawEvaluation {
        total_score: Some(0.0),
        defect_detection_score: Some(0.0),
        business_coverage_score: Some(0.0),
        executability_score: Some(0.0),
        assertion_score: Some(0.0),
        standard_score: Some(0.0),
        non_redundancy_score: Some(0.0),
        suggestions: vec!["no test cases supplied; nothing to evaluate".into()],
        score_method: Some("HEURISTIC".into()),
        score_details,
        ..Default::default()
    }
}

fn case_text(case: &TestCase) -> String {
    let mut text = case.title.to_lowercase();
    for step in &case.front_end_steps {
        text.push(' ');
        text.push_str(&step.action.to_lowercase());
        text.push(' ');
        text.push_str(&step.element.to_lowercase());
    }
    for step in &case.back_end_steps {
        text.push(' ');
        text.push_str(&step.action.to_lowercase());
    }
    text
}

fn keyword_ratio(cases: &[TestCase], keywords: &[&str]) -> f64 {
    let hits = cases
        .iter()
        .filter(|c| {
            let text = case_text(c);
            keywords.iter().any(|k| text.contains(k))
        })
        .count();
    hits as f64 / cases.len() as f64
}

/// Boundary coverage is expected on ~15% of cases, exception coverage
/// on ~20%; hitting the target earns full marks for that half.
fn defect_detection(cases: &[TestCase]) -> f64 {
    let boundary = (keyword_ratio(cases, BOUNDARY_KEYWORDS) / 0.15 * 100.0).min(100.0);
    let exception_hits = cases
        .iter()
        .filter(|c| {
            c.scene_type == SceneType::Exception
                || EXCEPTION_KEYWORDS.iter().any(|k| case_text(c).contains(k))
        })
        .count();
    let exception =
        (exception_hits as f64 / cases.len() as f64 / 0.20 * 100.0).min(100.0);
    (boundary + exception) / 2.0
}

fn business_coverage(cases: &[TestCase]) -> f64 {
    let scenes: HashSet<SceneType> = cases.iter().map(|c| c.scene_type).collect();
    let mut scene_score = 0.0;
    if scenes.contains(&SceneType::Frontend) {
        scene_score += 40.0;
    }
    if scenes.contains(&SceneType::Backend) {
        scene_score += 40.0;
    }
    if scenes.contains(&SceneType::Integration) {
        scene_score += 20.0;
    }

    let modules: HashSet<&str> = cases
        .iter()
        .map(|c| c.module.as_str())
        .filter(|m| !m.is_empty())
        .collect();
    let module_score = (modules.len() as f64 * 20.0).min(100.0);

    let actions: HashSet<String> = cases
        .iter()
        .flat_map(|c| {
            c.front_end_steps
                .iter()
                .map(|s| s.action.to_lowercase())
                .chain(c.back_end_steps.iter().map(|s| s.action.to_lowercase()))
        })
        .filter(|a| !a.is_empty())
        .collect();
    let action_score = (actions.len() as f64 * 10.0).min(100.0);

    (scene_score + module_score + action_score) / 3.0
}

/// Per-case: half from step count and concreteness, half from having
/// checkable expectations.
fn executability(cases: &[TestCase]) -> f64 {
    let sum: f64 = cases
        .iter()
        .map(|c| {
            let step_count = c.front_end_steps.len() + c.back_end_steps.len();
            let mut step_score: f64 = match step_count {
                3..=8 => 50.0,
                2..=10 => 40.0,
                1.. => 20.0,
                0 => 0.0,
            };
            let vague = c
                .front_end_steps
                .iter()
                .map(|s| s.action.to_lowercase())
                .chain(c.back_end_steps.iter().map(|s| s.action.to_lowercase()))
                .filter(|a| VAGUE_STEP_KEYWORDS.iter().any(|k| a.contains(k)))
                .count();
            step_score = (step_score - vague as f64 * 5.0).max(0.0);

            let expected_count = c.front_end_expected.len() + c.back_end_expected.len();
            let expected_score = match expected_count {
                3.. => 50.0,
                2 => 44.0,
                1 => 36.0,
                0 if c.assert_rules.as_ref().is_some_and(|r| !r.is_empty()) => 40.0,
                0 => 0.0,
            };
            step_score + expected_score
        })
        .sum();
    sum / cases.len() as f64
}

fn assertion_completeness(cases: &[TestCase]) -> f64 {
    let sum: f64 = cases
        .iter()
        .map(|c| {
            let rules = c.assert_rules.as_deref().unwrap_or(&[]);
            let rule_score = match rules.len() {
                3.. => 40.0,
                2 => 32.0,
                1 => 20.0,
                0 => 0.0,
            };
            let complete = rules
                .iter()
                .filter(|r| !r.field.is_empty() && !r.operator.is_empty())
                .count();
            let completeness_score = if rules.is_empty() {
                0.0
            } else {
                complete as f64 / rules.len() as f64 * 30.0
            };
            let expected_count = c.front_end_expected.len() + c.back_end_expected.len();
            let expected_score = match expected_count {
                3.. => 30.0,
                2 => 24.0,
                1 => 15.0,
                0 => 0.0,
            };
            rule_score + completeness_score + expected_score
        })
        .sum();
    sum / cases.len() as f64
}

fn standard_compliance(cases: &[TestCase]) -> f64 {
    let sum: f64 = cases
        .iter()
        .map(|c| {
            let mut score = 0.0;
            if well_formed_id(&c.case_id) {
                score += 50.0;
            }
            if !c.title.trim().is_empty() && !c.module.trim().is_empty() {
                score += 50.0;
            }
            score
        })
        .sum();
    sum / cases.len() as f64
}

/// "TC_" followed by exactly four ASCII digits.
fn well_formed_id(id: &str) -> bool {
    match id.strip_prefix("TC_") {
        Some(rest) => rest.len() == 4 && rest.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

/// A case is a duplicate when it is similar to any earlier case, so a
/// pair of near-identical cases counts once.
fn non_redundancy(cases: &[TestCase]) -> f64 {
    let duplicates = cases
        .iter()
        .enumerate()
        .filter(|(i, c)| cases[..*i].iter().any(|prev| matcher::is_similar(prev, c)))
        .count();
    (1.0 - duplicates as f64 / cases.len() as f64) * 100.0
}

fn suggestions_for(dims: &[(&str, f64); 6]) -> Vec<String> {
    let mut out = Vec::new();
    for (label, value) in dims {
        if *value >= 60.0 {
            continue;
        }
        let advice = match *label {
            "defect detection" => "add boundary and exception scenarios",
            "business coverage" => "cover more modules, scene types and interaction kinds",
            "executability" => "write 3-8 concrete steps and explicit expected results per case",
            "assertion completeness" => "add machine-checkable assert rules with field and operator",
            "standard compliance" => "use TC_NNNN ids and fill in title and module",
            "non-redundancy" => "merge cases with near-identical titles",
            _ => continue,
        };
        out.push(advice.to_string());
    }
    out
}

/// Match each reference to the first similar AI case. Exact lowercased
/// title equality scores 100, a token-overlap match 60.
fn match_references(store: &CaseStore) -> Vec<RawMatchDetail> {
    store
        .reference_cases()
        .iter()
        .map(|reference| {
            let hit = store
                .ai_cases()
                .iter()
                .find(|ai| matcher::is_similar(ai, reference));
            let score = hit.map(|ai| {
                if ai.title.to_lowercase() == reference.title.to_lowercase() {
                    100.0
                } else {
                    60.0
                }
            });
            RawMatchDetail {
                reference_case_id: reference.case_id.clone(),
                reference_case_title: Some(reference.title.clone()),
                matched_ai_case_id: hit.map(|ai| ai.case_id.clone()),
                matched_ai_case_title: hit.map(|ai| ai.title.clone()),
                match_score: score,
                analysis: None,
            }
        })
        .collect()
}
