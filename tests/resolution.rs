//! Location Resolution Integration Tests
//!
//! Tests for the reference grammar against indexed documents under each
//! indexing policy.

use minutecheck::document::{DocumentIndex, IndexPolicy};
use minutecheck::location::{resolve, ResolveMode, Resolver};
use minutecheck::LocationKey;

/// Sparse document where line 4 is blank and line 5 is two tabs deep
fn minutes() -> DocumentIndex {
    DocumentIndex::build(
        vec![
            "Minutes of the 3rd board meeting",
            "\tPresent: five members",
            "Opening remarks",
            "",
            "\t\tThe chair confirmed a quorum.",
            "The agenda was adopted.",
        ],
        IndexPolicy::Sparse,
    )
}

#[test]
fn test_exact_tab_must_match() {
    let index = minutes();
    assert_eq!(resolve("L5:T2", &index), vec![LocationKey::new(5, 2)]);
    assert_eq!(resolve("L5:T3", &index), Vec::<LocationKey>::new());
}

#[test]
fn test_wildcard_accepts_any_tab() {
    let index = minutes();
    assert_eq!(resolve("L5:C", &index), vec![LocationKey::new(5, 2)]);
}

#[test]
fn test_range_skips_blank_line() {
    let index = minutes();
    let keys = resolve("L3:T0 - L6:T0", &index);
    assert_eq!(
        keys,
        vec![
            LocationKey::new(3, 0),
            LocationKey::new(5, 2),
            LocationKey::new(6, 0),
        ]
    );
}

#[test]
fn test_range_past_end_of_document() {
    let index = minutes();
    let keys = resolve("L5:T0 - L50:T0", &index);
    assert_eq!(keys, vec![LocationKey::new(5, 2), LocationKey::new(6, 0)]);
}

#[test]
fn test_dense_and_sparse_address_differently() {
    let paragraphs = vec!["A", "", "B"];
    let dense = DocumentIndex::build(paragraphs.clone(), IndexPolicy::Dense);
    let sparse = DocumentIndex::build(paragraphs, IndexPolicy::Sparse);

    assert_eq!(dense.text(&resolve("L2:C", &dense)[0]), Some("B"));
    assert!(resolve("L2:C", &sparse).is_empty());
    assert_eq!(sparse.text(&resolve("L3:C", &sparse)[0]), Some("B"));
}

#[test]
fn test_labeled_policy_trusts_embedded_labels() {
    let index = DocumentIndex::build(
        vec!["L10:T0: Call to order", "L11:T1: Roll call", "Unnumbered note"],
        IndexPolicy::Labeled,
    );
    assert_eq!(resolve("L11:T1", &index), vec![LocationKey::new(11, 1)]);
    assert_eq!(index.text(&LocationKey::new(11, 1)), Some("Roll call"));
    assert_eq!(resolve("L1:C - L20:C", &index).len(), 2);
}

#[test]
fn test_labeled_range_returns_every_key_on_each_line() {
    let index = DocumentIndex::build(
        vec!["L2:T0: Alpha", "L2:T1: Beta", "L3:T0: Gamma"],
        IndexPolicy::Labeled,
    );
    assert_eq!(
        resolve("L2:T0 - L3:T0", &index),
        vec![
            LocationKey::new(2, 0),
            LocationKey::new(2, 1),
            LocationKey::new(3, 0),
        ]
    );
}

#[test]
fn test_labeled_wildcard_skips_blank_first_key() {
    let index = DocumentIndex::build(vec!["L2:T0:", "L2:T1: Beta"], IndexPolicy::Labeled);
    assert_eq!(resolve("L2:C", &index), vec![LocationKey::new(2, 1)]);
    assert_eq!(index.text(&LocationKey::new(2, 1)), Some("Beta"));
    assert!(resolve("L2:T0", &index).is_empty());
}

#[test]
fn test_labeled_duplicate_keeps_blank_first_label() {
    let index = DocumentIndex::build(vec!["L4:T0:", "L4:T0: Late text"], IndexPolicy::Labeled);
    assert!(resolve("L4:C", &index).is_empty());
}

#[test]
fn test_neighborhood_mode_is_opt_in() {
    let index = minutes();
    let exact = Resolver::new(&index);
    let tolerant = Resolver::new(&index).with_mode(ResolveMode::Neighborhood, 1);

    assert!(exact.resolve_str("L4:T0").unwrap().is_empty());
    assert_eq!(
        tolerant.resolve_str("L4:T0").unwrap(),
        vec![LocationKey::new(3, 0), LocationKey::new(5, 2)]
    );
}
