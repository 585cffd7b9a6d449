// src/core/store.rs — Per-request case collections

use crate::core::types::{EvaluationMode, TestCase};

/// Snapshot of the two case collections a comparison or export works
/// over. Built fresh per request and replaced wholesale; nothing
/// mutates a store after construction.
#[derive(Debug, Clone, Default)]
pub struct CaseStore {
    ai_cases: Vec<TestCase>,
    reference_cases: Vec<TestCase>,
}

impl CaseStore {
    pub fn new(ai_cases: Vec<TestCase>, reference_cases: Vec<TestCase>) -> Self {
        Self {
            ai_cases,
            reference_cases,
        }
    }

    pub fn ai_cases(&self) -> &[TestCase] {
        &self.ai_cases
    }

    pub fn reference_cases(&self) -> &[TestCase] {
        &self.reference_cases
    }

    pub fn ai_by_id(&self, case_id: &str) -> Option<&TestCase> {
        self.ai_cases.iter().find(|c| c.case_id == case_id)
    }

    pub fn reference_by_id(&self, case_id: &str) -> Option<&TestCase> {
        self.reference_cases.iter().find(|c| c.case_id == case_id)
    }

    /// Mode requested for this store: any reference case means
    /// comparison, none means standalone.
    pub fn requested_mode(&self) -> EvaluationMode {
        EvaluationMode::from_reference_count(self.reference_cases.len())
    }
}
