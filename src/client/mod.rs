// src/client/mod.rs — Evaluation endpoint client

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{RawEvaluation, TestCase};
use crate::evaluator::parser;
use crate::infra::config::EndpointConfig;
use crate::infra::errors::TestgenError;

/// Request body for `POST /api/testcase/compare`. An empty
/// `referenceCases` array asks the server for a standalone evaluation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest<'a> {
    pub ai_cases: &'a [TestCase],
    pub reference_cases: &'a [TestCase],
    pub prd_text: &'a str,
}

/// Standard response envelope of the evaluation service.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CompareEnvelope {
    success: bool,
    message: Option<String>,
    result: Option<serde_json::Value>,
}

/// Source of raw evaluations. The HTTP client is the production
/// implementation; tests swap in a canned one.
#[async_trait]
pub trait EvaluationBackend: Send + Sync {
    async fn compare(&self, request: CompareRequest<'_>) -> Result<RawEvaluation, TestgenError>;
}

pub struct HttpEvaluationClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpEvaluationClient {
    pub fn new(config: &EndpointConfig) -> Result<Self, TestgenError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl EvaluationBackend for HttpEvaluationClient {
    async fn compare(&self, request: CompareRequest<'_>) -> Result<RawEvaluation, TestgenError> {
        let url = format!("{}/api/testcase/compare", self.base_url);
        debug!(%url, ai_cases = request.ai_cases.len(), "requesting evaluation");

        let response = self.http.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TestgenError::Endpoint(format!(
                "evaluation endpoint returned {status}: {body}"
            )));
        }

        let envelope: CompareEnvelope = response.json().await?;
        if !envelope.success {
            return Err(TestgenError::Endpoint(
                envelope
                    .message
                    .unwrap_or_else(|| "evaluation failed".into()),
            ));
        }

        match envelope.result {
            None => Err(TestgenError::EmptyResponse),
            // Some backends return the evaluation as an embedded JSON
            // string, possibly fenced or truncated
            Some(serde_json::Value::String(s)) => parser::parse_evaluation(&s),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }
}
