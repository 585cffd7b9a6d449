// src/infra/errors.rs — Error types for testgen

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestgenError {
    // User errors: a case collection that failed to parse or validate.
    // Resolved at the boundary and shown as a message, never a fault.
    #[error("Invalid case collection: {0}")]
    InvalidCases(String),

    #[error("Case '{case_id}' not found in the collection")]
    CaseNotFound { case_id: String },

    // Upstream evaluation failures (not retried; surfaced verbatim)
    #[error("Evaluation endpoint error: {0}")]
    Endpoint(String),

    #[error("Evaluation response was empty")]
    EmptyResponse,

    // Infra
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
