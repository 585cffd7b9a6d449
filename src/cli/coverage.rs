// src/cli/coverage.rs — `testgen coverage`

use crate::cli::load_cases;
use crate::evaluator::matcher;

pub fn run_coverage(ai: &str, reference: &str) -> anyhow::Result<()> {
    let ai_cases = load_cases(ai)?;
    let references = load_cases(reference)?;

    let rate = matcher::coverage_rate(&references, &ai_cases);
    let matched = references
        .iter()
        .filter(|r| ai_cases.iter().any(|a| matcher::is_similar(a, r)))
        .count();

    println!(
        "Coverage: {rate:.1}% ({matched} of {} reference cases)",
        references.len()
    );
    for reference in &references {
        let hit = ai_cases.iter().find(|a| matcher::is_similar(a, reference));
        match hit {
            Some(ai) => println!("  [x] {} {} -> {}", reference.case_id, reference.title, ai.case_id),
            None => println!("  [ ] {} {}", reference.case_id, reference.title),
        }
    }
    Ok(())
}
