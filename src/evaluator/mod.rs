// src/evaluator/mod.rs — Evaluation pipeline

pub mod heuristic;
pub mod matcher;
pub mod parser;
pub mod report;
pub mod scores;

use std::sync::Arc;

use tracing::info;

use crate::client::{CompareRequest, EvaluationBackend};
use crate::core::store::CaseStore;
use crate::evaluator::report::{build_report, ComparisonResult};
use crate::infra::errors::TestgenError;

/// Runs a store of cases through a backend and normalizes the result.
pub struct EvaluationService {
    backend: Arc<dyn EvaluationBackend>,
}

impl EvaluationService {
    pub fn new(backend: Arc<dyn EvaluationBackend>) -> Self {
        Self { backend }
    }

    /// Evaluate against the configured endpoint. Endpoint failures
    /// surface as errors; there is no silent fallback to the local
    /// scorer.
    pub async fn evaluate(
        &self,
        store: &CaseStore,
        prd_text: &str,
    ) -> Result<ComparisonResult, TestgenError> {
        let request = CompareRequest {
            ai_cases: store.ai_cases(),
            reference_cases: store.reference_cases(),
            prd_text,
        };
        info!(
            ai_cases = store.ai_cases().len(),
            reference_cases = store.reference_cases().len(),
            mode = %store.requested_mode(),
            "starting evaluation"
        );
        let raw = self.backend.compare(request).await?;
        let result = build_report(&raw, store);
        info!(total = result.total_score, method = %result.score_method, "evaluation finished");
        Ok(result)
    }
}

/// Evaluate locally with the rule-based scorer. Infallible and
/// offline; an explicit alternative, not a fallback.
pub fn evaluate_offline(store: &CaseStore, prd_text: &str) -> ComparisonResult {
    let raw = heuristic::evaluate(store, prd_text);
    build_report(&raw, store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{EvaluationMode, TestCase};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_offline_evaluation_is_heuristic() {
        let store = CaseStore::new(vec![TestCase::new("TC_0001", "login works")], vec![]);
        let result = evaluate_offline(&store, "");
        assert_eq!(result.score_method, "HEURISTIC");
        assert_eq!(result.mode, EvaluationMode::Standalone);
    }
}
