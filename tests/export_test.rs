// tests/export_test.rs — Export formats and artifacts

use pretty_assertions::assert_eq;

use testgen::core::types::{AssertRule, BackEndStep, FrontEndStep, Priority, SceneType, TestCase};
use testgen::export::{
    case_export_filename, export_collection, sanitize_filename, serialize_case, serialize_cases,
    ExportFormat,
};

fn sample_case() -> TestCase {
    TestCase {
        module: "checkout".into(),
        scene_type: SceneType::Integration,
        priority: Priority::P2,
        pre_condition: vec!["cart has one item".into()],
        front_end_steps: vec![FrontEndStep {
            action: "click".into(),
            element: "pay button".into(),
            value: None,
        }],
        back_end_steps: vec![BackEndStep {
            action: "charge card".into(),
            method: Some("POST".into()),
            api_path: Some("/api/payments".into()),
        }],
        front_end_expected: vec!["confirmation page shown".into()],
        back_end_expected: vec!["payment recorded".into()],
        assert_rules: Some(vec![AssertRule {
            field: "payment.status".into(),
            operator: "equals".into(),
            expected: Some("captured".into()),
            description: "charge captured".into(),
        }]),
        tags: None,
        ..TestCase::new("TC_0042", "Checkout completes")
    }
}

#[test]
fn test_json_round_trip_preserves_every_field() {
    let cases = vec![sample_case(), TestCase::new("TC_0043", "bare case")];
    let json = serialize_cases(&cases, ExportFormat::Json).unwrap();
    let back: Vec<TestCase> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cases);
}

#[test]
fn test_csv_contract_is_fixed_and_unescaped() {
    let case = TestCase {
        module: "auth".into(),
        ..TestCase::new("TC_0001", r#"He said "go", then left"#)
    };
    let csv = serialize_cases(&[case], ExportFormat::Csv).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "ID,Title,Module,Priority,Type,Frontend Steps,Backend Steps"
    );
    // Quoted, never escaped: embedded quotes and commas pass through
    assert_eq!(
        lines.next().unwrap(),
        "TC_0001,\"He said \"go\", then left\",auth,P1,FRONTEND,\"\",\"\""
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn test_filename_sanitization_and_truncation() {
    assert_eq!(sanitize_filename("a/b\\c"), "a_b_c");
    assert_eq!(sanitize_filename("safe title"), "safe title");

    let case = TestCase::new("TC_1", "A/B:C*D?");
    assert_eq!(
        case_export_filename(&case, ExportFormat::Json),
        "TC_1_A_B_C_D_.json"
    );

    let long_title: String = "t".repeat(120);
    let long_case = TestCase::new("TC_2", long_title);
    let filename = case_export_filename(&long_case, ExportFormat::Txt);
    assert_eq!(filename, format!("TC_2_{}.txt", "t".repeat(50)));
}

#[test]
fn test_markdown_and_txt_render_all_sections() {
    let md = serialize_case(&sample_case(), ExportFormat::Markdown).unwrap();
    assert!(md.contains("## TC_0042: Checkout completes"));
    assert!(md.contains("- **Frontend steps**:"));
    assert!(md.contains("  1. charge card [POST] /api/payments"));
    assert!(md.contains("  - payment.status equals captured - charge captured"));

    let txt = serialize_case(&sample_case(), ExportFormat::Txt).unwrap();
    assert!(txt.contains("Case ID:    TC_0042"));
    assert!(txt.contains("  1. [Frontend] click pay button"));
    assert!(txt.contains("  2. [Backend] charge card [POST] /api/payments"));
}

#[test]
fn test_artifact_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = export_collection(&[sample_case()], ExportFormat::Markdown).unwrap();
    assert_eq!(artifact.filename, "testcases.md");
    assert_eq!(artifact.mime_type, "text/markdown");

    let path = dir.path().join(&artifact.filename);
    std::fs::write(&path, &artifact.content).unwrap();
    let read_back = std::fs::read_to_string(&path).unwrap();
    assert_eq!(read_back, artifact.content);
}
