//! End-to-End Checking Tests
//!
//! Document paragraphs in, one result record per non-blank row out.

mod common;

use minutecheck::check::{CheckOptions, MarkerStyle, RowChecker};
use minutecheck::document::{docx, DocumentIndex, IndexPolicy};
use minutecheck::domain::UnresolvedReason;
use minutecheck::sheet::{ColumnLayout, Sheet, SheetError};
use minutecheck::{CheckStatus, LocationKey};

use common::{claim_row, docx_bytes};

fn header() -> Vec<&'static str> {
    vec!["No", "Agenda", "Speaker", "Sentence", "Note", "Location", "Checked"]
}

#[test]
fn test_dense_document_match_and_mismatch() {
    let index = DocumentIndex::build(vec!["", "Hello world", "\tGoodbye"], IndexPolicy::Dense);
    let entries: Vec<(LocationKey, &str)> = index.entries().map(|(k, v)| (*k, v)).collect();
    assert_eq!(
        entries,
        vec![
            (LocationKey::new(1, 0), "Hello world"),
            (LocationKey::new(2, 1), "Goodbye"),
        ]
    );

    let checker = RowChecker::new(&index, CheckOptions::default());
    let results = checker.check_rows(
        vec![("Hello world", "L1:T0"), ("Hello there", "L1:T0")],
        2,
    );

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].status, CheckStatus::Match);

    let mismatch = &results[1];
    assert_eq!(mismatch.status, CheckStatus::Mismatch);
    assert_eq!(mismatch.located_text.as_deref(), Some("Hello world"));
    let highlighted = mismatch.highlighted.as_deref().unwrap();
    assert!(highlighted.starts_with("Hello [["));
    assert_eq!(highlighted.replace("[[", "").replace("]]", ""), "Hello there");
}

#[test]
fn test_docx_document_through_sheet() {
    let bytes = docx_bytes(&[
        "Minutes of the meeting",
        "",
        "\tThe chair opened the meeting at 9:00.",
        "\tThe minutes of the previous meeting were adopted.",
        "Any other business",
    ]);
    let paragraphs = docx::extract_paragraphs(&bytes).unwrap();
    let index = DocumentIndex::build(paragraphs, IndexPolicy::Sparse);

    let sheet = Sheet::from_rows(vec![
        header(),
        claim_row("The chair opened the meeting", "L3:T1"),
        claim_row("", "L3:T1"),
        claim_row("The minutes were adopted.", "L3:T0 - L4:T0"),
        claim_row("Any other business", "L5:C"),
        claim_row("Any other business", "L9:T0"),
        claim_row("Any other business", "row five"),
    ]);

    let checker = RowChecker::new(&index, CheckOptions::default());
    let results = checker.check_sheet(&sheet, &ColumnLayout::default()).unwrap();

    let rows: Vec<(usize, CheckStatus)> = results.iter().map(|r| (r.row, r.status)).collect();
    assert_eq!(
        rows,
        vec![
            (2, CheckStatus::Match),
            (4, CheckStatus::Mismatch),
            (5, CheckStatus::Match),
            (6, CheckStatus::UnresolvedLocation),
            (7, CheckStatus::UnresolvedLocation),
        ]
    );

    // Range mismatch shows both located paragraphs joined
    assert_eq!(
        results[1].located_text.as_deref(),
        Some(
            "The chair opened the meeting at 9:00. \
             The minutes of the previous meeting were adopted."
        )
    );
    assert_eq!(results[1].keys.len(), 2);
    assert_eq!(results[3].reason, Some(UnresolvedReason::NotFound));
    assert_eq!(results[4].reason, Some(UnresolvedReason::Malformed));
}

#[test]
fn test_sentence_across_paragraphs_does_not_match() {
    let index = DocumentIndex::build(vec!["The motion", "was carried."], IndexPolicy::Dense);
    let checker = RowChecker::new(&index, CheckOptions::default());

    let row = checker
        .check_row(2, "The motion was carried.", "L1:T0 - L2:T0")
        .unwrap();

    assert_eq!(row.status, CheckStatus::Mismatch);
    assert_eq!(row.located_text.as_deref(), Some("The motion was carried."));
    // Every character is present in the joined context, so nothing is marked
    assert_eq!(row.highlighted.as_deref(), Some("The motion was carried."));
}

#[test]
fn test_skipped_rows_keep_true_positions() {
    let index = DocumentIndex::build(vec!["Alpha", "Beta"], IndexPolicy::Dense);
    let sheet = Sheet::from_rows(vec![
        header(),
        claim_row("Alpha", "nan"),
        claim_row("None", "L1:T0"),
        claim_row("", ""),
        claim_row("Beta", "L2:T0"),
    ]);

    let checker = RowChecker::new(&index, CheckOptions::default());
    let results = checker.check_sheet(&sheet, &ColumnLayout::default()).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].row, 5);
}

#[test]
fn test_narrow_sheet_aborts_batch() {
    let index = DocumentIndex::build(vec!["Alpha"], IndexPolicy::Dense);
    let sheet = Sheet::from_rows(vec![vec!["a", "b", "c", "Alpha", "L1:T0"]]);

    let checker = RowChecker::new(&index, CheckOptions::default());
    let result = checker.check_sheet(&sheet, &ColumnLayout::default());

    assert!(matches!(
        result,
        Err(SheetError::MissingColumns {
            required: 6,
            found: 5,
            ..
        })
    ));
}

#[test]
fn test_custom_layout_and_markers() {
    let index = DocumentIndex::build(vec!["Budget approved"], IndexPolicy::Dense);
    let sheet = Sheet::from_rows(vec![vec!["L1:C", "Budget rejected"]]);
    let layout = ColumnLayout {
        sentence: 1,
        location: 0,
        header_rows: 0,
    };
    let options = CheckOptions {
        marker: MarkerStyle::Html,
        ..Default::default()
    };

    let checker = RowChecker::new(&index, options);
    let results = checker.check_sheet(&sheet, &layout).unwrap();

    assert_eq!(results[0].row, 1);
    assert_eq!(results[0].status, CheckStatus::Mismatch);
    assert!(results[0]
        .highlighted
        .as_deref()
        .unwrap()
        .contains(r#"<span style="background-color: #fdd835;">"#));
}

#[test]
fn test_empty_document_resolves_nothing() {
    let index = DocumentIndex::build(Vec::<String>::new(), IndexPolicy::Sparse);
    let checker = RowChecker::new(&index, CheckOptions::default());
    let row = checker.check_row(2, "Anything", "L1:C").unwrap();
    assert_eq!(row.status, CheckStatus::UnresolvedLocation);
}
