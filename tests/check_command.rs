//! Check Command Integration Tests
//!
//! Runs the full file-based pipeline: document and spreadsheet on disk,
//! report out.

mod common;

use minutecheck::cli::check::run_check;
use minutecheck::config::ResolvedConfig;
use minutecheck::document::IndexPolicy;
use minutecheck::report::{compute_hash, ReportFormat, ReportHeader};
use minutecheck::{CheckRow, CheckStatus};
use tempfile::TempDir;

use common::{claim_row, docx_bytes, write_fixture, xlsx_bytes};

fn header() -> Vec<&'static str> {
    vec!["No", "Agenda", "Speaker", "Sentence", "Note", "Location", "Checked"]
}

#[tokio::test]
async fn test_check_docx_against_xlsx() {
    let temp = TempDir::new().unwrap();
    let document = docx_bytes(&["", "Hello world", "\tGoodbye"]);
    let doc_path = write_fixture(temp.path(), "minutes.docx", &document);
    let sheet_path = write_fixture(
        temp.path(),
        "claims.xlsx",
        &xlsx_bytes(&[
            header(),
            claim_row("Hello world", "L1:T0"),
            claim_row("Hello there", "L1:T0"),
            claim_row("Goodbye", "L2:C"),
        ]),
    );

    let config = ResolvedConfig {
        policy: IndexPolicy::Dense,
        ..Default::default()
    };
    let report = run_check(&doc_path, &sheet_path, &config).await.unwrap();

    assert_eq!(report.header.document_sha256, compute_hash(&document));
    let statuses: Vec<(usize, CheckStatus)> =
        report.rows.iter().map(|r| (r.row, r.status)).collect();
    assert_eq!(
        statuses,
        vec![
            (2, CheckStatus::Match),
            (3, CheckStatus::Mismatch),
            (4, CheckStatus::Match),
        ]
    );
    assert_eq!(report.summary().mismatched, 1);
}

#[tokio::test]
async fn test_sparse_text_document_to_jsonl() {
    let temp = TempDir::new().unwrap();
    let doc_path = write_fixture(
        temp.path(),
        "minutes.txt",
        "Call to order\n\n\tQuorum present\n".as_bytes(),
    );
    let sheet_path = write_fixture(
        temp.path(),
        "claims.xlsx",
        &xlsx_bytes(&[
            header(),
            claim_row("Quorum present", "L3:T1"),
            claim_row("Quorum absent", "L2:T0 - L3:T0"),
        ]),
    );

    let report = run_check(&doc_path, &sheet_path, &ResolvedConfig::default())
        .await
        .unwrap();
    let jsonl = report.render(ReportFormat::Jsonl).unwrap();
    let lines: Vec<&str> = jsonl.lines().collect();
    assert_eq!(lines.len(), 3);

    let header: ReportHeader = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(header.policy, IndexPolicy::Sparse);
    assert_eq!(header.summary.total, 2);

    let first: CheckRow = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(first.status, CheckStatus::Match);

    let second: CheckRow = serde_json::from_str(lines[2]).unwrap();
    assert_eq!(second.status, CheckStatus::Mismatch);
    assert_eq!(second.located_text.as_deref(), Some("Quorum present"));
}

#[tokio::test]
async fn test_narrow_spreadsheet_is_fatal() {
    let temp = TempDir::new().unwrap();
    let doc_path = write_fixture(temp.path(), "minutes.txt", b"Hello world\n");
    let sheet_path = write_fixture(
        temp.path(),
        "claims.xlsx",
        &xlsx_bytes(&[vec!["a", "b", "c", "Hello world"]]),
    );

    let err = run_check(&doc_path, &sheet_path, &ResolvedConfig::default())
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("Missing expected columns"));
}

#[tokio::test]
async fn test_corrupt_docx_is_fatal() {
    let temp = TempDir::new().unwrap();
    let doc_path = write_fixture(temp.path(), "minutes.docx", b"not a zip archive");
    let sheet_path = write_fixture(
        temp.path(),
        "claims.xlsx",
        &xlsx_bytes(&[header(), claim_row("Hello", "L1:T0")]),
    );

    let err = run_check(&doc_path, &sheet_path, &ResolvedConfig::default())
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse document"));
}

#[tokio::test]
async fn test_missing_spreadsheet_is_fatal() {
    let temp = TempDir::new().unwrap();
    let doc_path = write_fixture(temp.path(), "minutes.txt", b"Hello world\n");
    let missing = temp.path().join("nope.xlsx");

    let result = run_check(&doc_path, &missing, &ResolvedConfig::default()).await;
    assert!(result.is_err());
}
