// src/export/mod.rs — Case serialization and export artifacts
//
// Four formats with fixed contracts. JSON is the only round-trip
// format; Markdown, CSV and TXT are write-only presentation shapes.
// The CSV writer quotes the title and step summaries but performs no
// escaping: a quote inside a title lands in the output verbatim. That
// is the documented contract, not an oversight.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::core::types::{BackEndStep, FrontEndStep, TestCase};
use crate::infra::errors::TestgenError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Json,
    Csv,
    Txt,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Txt => "txt",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Txt => "text/plain",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = TestgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "txt" | "text" => Ok(ExportFormat::Txt),
            other => Err(TestgenError::InvalidCases(format!(
                "unknown export format: {other}"
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A fully rendered export: content plus the filename and MIME type a
/// download layer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

/// Replace filesystem-hostile characters with underscores and truncate
/// to 50 characters. Truncation counts characters, not bytes, so
/// multibyte titles are never split mid-character.
pub fn sanitize_filename(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .take(50)
        .collect()
}

pub fn case_export_filename(case: &TestCase, format: ExportFormat) -> String {
    format!(
        "{}_{}.{}",
        case.case_id,
        sanitize_filename(&case.title),
        format.extension()
    )
}

/// Render a collection in the given format.
pub fn serialize_cases(cases: &[TestCase], format: ExportFormat) -> Result<String, TestgenError> {
    let content = match format {
        ExportFormat::Markdown => to_markdown(cases),
        ExportFormat::Json => serde_json::to_string_pretty(cases)?,
        ExportFormat::Csv => to_csv(cases),
        ExportFormat::Txt => cases
            .iter()
            .map(to_txt)
            .collect::<Vec<_>>()
            .join("\n----------------------------------------\n\n"),
    };
    Ok(content)
}

/// Render a single case. Markdown and CSV render it as a one-element
/// collection; TXT and JSON use the single-case shape.
pub fn serialize_case(case: &TestCase, format: ExportFormat) -> Result<String, TestgenError> {
    let content = match format {
        ExportFormat::Markdown => to_markdown(std::slice::from_ref(case)),
        ExportFormat::Json => serde_json::to_string_pretty(case)?,
        ExportFormat::Csv => to_csv(std::slice::from_ref(case)),
        ExportFormat::Txt => to_txt(case),
    };
    Ok(content)
}

pub fn export_case(case: &TestCase, format: ExportFormat) -> Result<ExportArtifact, TestgenError> {
    let content = serialize_case(case, format)?;
    debug!(case_id = %case.case_id, format = %format, bytes = content.len(), "rendered case");
    Ok(ExportArtifact {
        filename: case_export_filename(case, format),
        mime_type: format.mime_type(),
        content,
    })
}

pub fn export_collection(
    cases: &[TestCase],
    format: ExportFormat,
) -> Result<ExportArtifact, TestgenError> {
    let content = serialize_cases(cases, format)?;
    debug!(cases = cases.len(), format = %format, bytes = content.len(), "rendered collection");
    Ok(ExportArtifact {
        filename: format!("testcases.{}", format.extension()),
        mime_type: format.mime_type(),
        content,
    })
}

fn to_markdown(cases: &[TestCase]) -> String {
    let mut out = String::from("# Test Cases\n\n");
    for case in cases {
        out.push_str(&format!("## {}: {}\n\n", case.case_id, case.title));
        out.push_str(&format!("- **Module**: {}\n", case.module));
        out.push_str(&format!("- **Type**: {}\n", case.scene_type));
        out.push_str(&format!("- **Priority**: {}\n", case.priority));
        out.push_str(&format!(
            "- **Preconditions**: {}\n",
            case.pre_condition.join(", ")
        ));

        if !case.front_end_steps.is_empty() {
            out.push_str("- **Frontend steps**:\n");
            for (i, step) in case.front_end_steps.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", i + 1, front_step_line(step)));
            }
        }
        if !case.back_end_steps.is_empty() {
            out.push_str("- **Backend steps**:\n");
            for (i, step) in case.back_end_steps.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", i + 1, back_step_line(step)));
            }
        }

        let expected: Vec<&String> = case
            .front_end_expected
            .iter()
            .chain(case.back_end_expected.iter())
            .collect();
        if !expected.is_empty() {
            out.push_str("- **Expected results**:\n");
            for exp in expected {
                out.push_str(&format!("  - {exp}\n"));
            }
        }

        if let Some(rules) = case.assert_rules.as_ref().filter(|r| !r.is_empty()) {
            out.push_str("- **Assertions**:\n");
            for rule in rules {
                out.push_str(&format!(
                    "  - {} {} {} - {}\n",
                    rule.field,
                    rule.operator,
                    rule.expected.as_deref().unwrap_or(""),
                    rule.description
                ));
            }
        }
        out.push('\n');
    }
    out
}

/// Human-readable step line: action, element, and the value suffix
/// only when a non-empty value exists.
fn front_step_line(step: &FrontEndStep) -> String {
    let mut line = step.action.clone();
    if !step.element.is_empty() {
        line.push(' ');
        line.push_str(&step.element);
    }
    if let Some(value) = step.value.as_deref().filter(|v| !v.is_empty()) {
        line.push_str(": ");
        line.push_str(value);
    }
    line
}

/// The `[METHOD] path` suffix appears only when both parts are present.
fn back_step_line(step: &BackEndStep) -> String {
    match (step.method.as_deref(), step.api_path.as_deref()) {
        (Some(method), Some(path)) if !method.is_empty() && !path.is_empty() => {
            format!("{} [{method}] {path}", step.action)
        }
        _ => step.action.clone(),
    }
}

fn to_csv(cases: &[TestCase]) -> String {
    let mut out = String::from("ID,Title,Module,Priority,Type,Frontend Steps,Backend Steps\n");
    for case in cases {
        let front = case
            .front_end_steps
            .iter()
            .map(front_step_summary)
            .collect::<Vec<_>>()
            .join("; ");
        let back = case
            .back_end_steps
            .iter()
            .map(back_step_summary)
            .collect::<Vec<_>>()
            .join("; ");
        out.push_str(&format!(
            "{},\"{}\",{},{},{},\"{front}\",\"{back}\"\n",
            case.case_id, case.title, case.module, case.priority, case.scene_type
        ));
    }
    out
}

/// Only non-empty segments, joined by a single space.
fn front_step_summary(step: &FrontEndStep) -> String {
    [step.action.as_str(), step.element.as_str()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// CSV summarizes back-end steps as `METHOD path`; the action never
/// appears in this column.
fn back_step_summary(step: &BackEndStep) -> String {
    [
        step.method.as_deref().unwrap_or(""),
        step.api_path.as_deref().unwrap_or(""),
    ]
    .iter()
    .filter(|s| !s.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" ")
}

fn to_txt(case: &TestCase) -> String {
    let mut out = String::new();
    out.push_str(&format!("Case ID:    {}\n", case.case_id));
    out.push_str(&format!("Title:      {}\n", case.title));
    out.push_str(&format!("Module:     {}\n", case.module));
    out.push_str(&format!("Scene type: {}\n", case.scene_type));
    out.push_str(&format!("Priority:   {}\n", case.priority));
    out.push('\n');

    if !case.pre_condition.is_empty() {
        out.push_str("Preconditions:\n");
        for (i, pre) in case.pre_condition.iter().enumerate() {
            out.push_str(&format!("  {}. {pre}\n", i + 1));
        }
        out.push('\n');
    }

    if !case.front_end_steps.is_empty() || !case.back_end_steps.is_empty() {
        out.push_str("Steps:\n");
        let mut n = 0;
        for step in &case.front_end_steps {
            n += 1;
            out.push_str(&format!("  {n}. [Frontend] {}\n", front_step_line(step)));
        }
        for step in &case.back_end_steps {
            n += 1;
            out.push_str(&format!("  {n}. [Backend] {}\n", back_step_line(step)));
        }
        out.push('\n');
    }

    let expected: Vec<&String> = case
        .front_end_expected
        .iter()
        .chain(case.back_end_expected.iter())
        .collect();
    if !expected.is_empty() {
        out.push_str("Expected results:\n");
        for (i, exp) in expected.iter().enumerate() {
            out.push_str(&format!("  {}. {exp}\n", i + 1));
        }
        out.push('\n');
    }

    if let Some(rules) = case.assert_rules.as_ref().filter(|r| !r.is_empty()) {
        out.push_str("Assertions:\n");
        for (i, rule) in rules.iter().enumerate() {
            out.push_str(&format!(
                "  {}. {} {} {} - {}\n",
                i + 1,
                rule.field,
                rule.operator,
                rule.expected.as_deref().unwrap_or(""),
                rule.description
            ));
        }
    }

    out
}
