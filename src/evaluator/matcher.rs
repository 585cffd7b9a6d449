// src/evaluator/matcher.rs — Local similarity heuristic
//
// A cheap pre-check for "do these two cases describe the same
// scenario", used to estimate coverage before an authoritative
// server-side comparison exists. Purely title-based, deterministic,
// no side effects.

use std::collections::HashSet;

use crate::core::types::TestCase;

/// Two cases are similar when their lowercased titles are equal, or
/// when the titles share at least two whitespace-separated tokens
/// longer than two characters. Short tokens are ignored to avoid false
/// positives from connector words.
pub fn is_similar(a: &TestCase, b: &TestCase) -> bool {
    let t1 = a.title.to_lowercase();
    let t2 = b.title.to_lowercase();
    if t1 == t2 {
        return true;
    }

    let tokens_b: HashSet<&str> = t2.split_whitespace().collect();
    let common: HashSet<&str> = t1
        .split_whitespace()
        .filter(|w| w.chars().count() > 2 && tokens_b.contains(w))
        .collect();

    common.len() >= 2
}

/// Percentage of reference cases with at least one similar AI case.
/// Returns 0 when either collection is empty.
pub fn coverage_rate(references: &[TestCase], ai_cases: &[TestCase]) -> f64 {
    if references.is_empty() || ai_cases.is_empty() {
        return 0.0;
    }

    let matched = references
        .iter()
        .filter(|r| ai_cases.iter().any(|a| is_similar(a, r)))
        .count();

    matched as f64 / references.len() as f64 * 100.0
}
