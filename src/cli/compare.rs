// src/cli/compare.rs — `testgen compare`

use std::sync::Arc;

use crate::cli::{load_cases, load_optional_cases, read_prd};
use crate::client::HttpEvaluationClient;
use crate::core::store::CaseStore;
use crate::evaluator::report::render_text_report;
use crate::evaluator::EvaluationService;
use crate::infra::config::Config;

pub async fn run_compare(
    ai: &str,
    reference: Option<&str>,
    prd: Option<&str>,
    endpoint: Option<&str>,
    json: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let store = CaseStore::new(load_cases(ai)?, load_optional_cases(reference)?);
    let prd_text = read_prd(prd)?;

    let mut endpoint_config = config.endpoint.clone();
    if let Some(url) = endpoint {
        endpoint_config.base_url = url.to_string();
    }

    let client = HttpEvaluationClient::new(&endpoint_config)?;
    let service = EvaluationService::new(Arc::new(client));
    let result = service.evaluate(&store, &prd_text).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_text_report(&result));
    }
    Ok(())
}
