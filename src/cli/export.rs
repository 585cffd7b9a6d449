// src/cli/export.rs — `testgen export`

use crate::cli::load_cases;
use crate::export::{export_case, export_collection, ExportFormat};
use crate::infra::errors::TestgenError;

pub fn run_export(
    input: &str,
    format: &str,
    output: Option<&str>,
    case_id: Option<&str>,
) -> anyhow::Result<()> {
    let cases = load_cases(input)?;
    let format: ExportFormat = format.parse()?;

    let artifact = match case_id {
        Some(id) => {
            let case = cases
                .iter()
                .find(|c| c.case_id == id)
                .ok_or_else(|| TestgenError::CaseNotFound {
                    case_id: id.to_string(),
                })?;
            export_case(case, format)?
        }
        None => export_collection(&cases, format)?,
    };

    let path = output.unwrap_or(&artifact.filename);
    std::fs::write(path, &artifact.content)?;
    println!("Exported {} ({}) to {path}", artifact.filename, artifact.mime_type);
    Ok(())
}
