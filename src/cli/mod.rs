// src/cli/mod.rs — CLI definition (clap derive)

pub mod compare;
pub mod coverage;
pub mod export;
pub mod score;

use clap::{Parser, Subcommand};

use crate::core::types::TestCase;
use crate::infra::errors::TestgenError;

#[derive(Parser)]
#[command(name = "testgen", about = "Test-case evaluation and export", version)]
pub struct Cli {
    /// Config file path (defaults to ./testgen.toml when present)
    #[arg(long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate AI cases against the evaluation endpoint
    Compare {
        /// JSON file with the AI-generated cases
        ai: String,
        /// JSON file with reference cases (omit for standalone mode)
        #[arg(short, long)]
        reference: Option<String>,
        /// Requirements document passed along for context
        #[arg(short, long)]
        prd: Option<String>,
        /// Override the configured endpoint base URL
        #[arg(long)]
        endpoint: Option<String>,
        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Score cases locally with the rule-based evaluator (offline)
    Score {
        /// JSON file with the AI-generated cases
        ai: String,
        /// JSON file with reference cases (omit for standalone mode)
        #[arg(short, long)]
        reference: Option<String>,
        /// Requirements document passed along for context
        #[arg(short, long)]
        prd: Option<String>,
        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Title-similarity coverage of reference cases by AI cases
    Coverage {
        /// JSON file with the AI-generated cases
        ai: String,
        /// JSON file with reference cases
        reference: String,
    },
    /// Export cases to markdown, json, csv or txt
    Export {
        /// JSON file with the cases to export
        input: String,
        /// Output format: markdown|md, json, csv, txt|text
        #[arg(short, long, default_value = "markdown")]
        format: String,
        /// Output file (defaults to a name derived from the content)
        #[arg(short, long)]
        output: Option<String>,
        /// Export a single case instead of the whole collection
        #[arg(long)]
        case_id: Option<String>,
    },
}

/// Load a case collection from a JSON file. Accepts either a bare
/// array or a single case object.
pub(crate) fn load_cases(path: &str) -> Result<Vec<TestCase>, TestgenError> {
    let raw = std::fs::read_to_string(path)?;
    let trimmed = raw.trim_start();
    if trimmed.starts_with('{') {
        let case: TestCase = serde_json::from_str(trimmed)
            .map_err(|e| TestgenError::InvalidCases(format!("{path}: {e}")))?;
        return Ok(vec![case]);
    }
    serde_json::from_str(trimmed).map_err(|e| TestgenError::InvalidCases(format!("{path}: {e}")))
}

pub(crate) fn load_optional_cases(path: Option<&str>) -> Result<Vec<TestCase>, TestgenError> {
    match path {
        Some(p) => load_cases(p),
        None => Ok(Vec::new()),
    }
}

pub(crate) fn read_prd(path: Option<&str>) -> Result<String, TestgenError> {
    match path {
        Some(p) => Ok(std::fs::read_to_string(p)?),
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_cases_array_and_single_object() {
        let dir = tempfile::tempdir().unwrap();

        let array_path = dir.path().join("cases.json");
        std::fs::write(&array_path, r#"[{"caseId":"TC_0001","title":"a"}]"#).unwrap();
        let cases = load_cases(array_path.to_str().unwrap()).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].case_id, "TC_0001");

        let single_path = dir.path().join("case.json");
        std::fs::write(&single_path, r#"{"caseId":"TC_0002","title":"b"}"#).unwrap();
        let cases = load_cases(single_path.to_str().unwrap()).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].case_id, "TC_0002");
    }

    #[test]
    fn test_load_cases_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();
        let err = load_cases(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, TestgenError::InvalidCases(_)));
    }

    #[test]
    fn test_load_optional_cases_none_is_empty() {
        assert!(load_optional_cases(None).unwrap().is_empty());
    }
}
