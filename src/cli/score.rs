// src/cli/score.rs — `testgen score` (offline heuristic)

use crate::cli::{load_cases, load_optional_cases, read_prd};
use crate::core::store::CaseStore;
use crate::evaluator::evaluate_offline;
use crate::evaluator::report::render_text_report;

pub fn run_score(
    ai: &str,
    reference: Option<&str>,
    prd: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let store = CaseStore::new(load_cases(ai)?, load_optional_cases(reference)?);
    let prd_text = read_prd(prd)?;

    let result = evaluate_offline(&store, &prd_text);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_text_report(&result));
    }
    Ok(())
}
