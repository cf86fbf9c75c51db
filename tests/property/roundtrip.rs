//! Property-based tests: codec round-trip fidelity and merge behavior over
//! generated documents.

use codeclip::codec;
use codeclip::document::{Document, EntryRecord, Snapshot};
use codeclip::merge;
use proptest::prelude::*;

fn entry_strategy() -> impl Strategy<Value = EntryRecord> {
    let path = "[a-z]{1,8}(/[a-z]{1,8}){0,2}";
    // Printable content without the tag terminators the codec cannot escape.
    let content = "[ -~\n]{0,120}".prop_filter("content must not embed tag terminators", |c: &String| {
        !c.contains("</file>") && !c.contains("</codebase>") && !c.contains("</instructions>")
    });
    prop_oneof![
        (path, content, 0u32..100_000)
            .prop_map(|(p, c, t)| EntryRecord::file(p, c, t)),
        ("[a-z]{1,8}", 0u32..100).prop_map(|(p, t)| EntryRecord::directory(p, t)),
    ]
}

fn document_strategy() -> impl Strategy<Value = Document> {
    let snapshot = ("/[a-z]{1,10}", prop::collection::vec(entry_strategy(), 0..8));
    prop::collection::vec(snapshot, 0..4).prop_map(|parts| {
        let mut document = Document::default();
        for (root, entries) in parts {
            document.upsert_snapshot(Snapshot::from_records(root, entries));
        }
        document
    })
}

/// Every document the codec produces decodes back to a structurally equal
/// document.
#[test]
fn test_roundtrip_fidelity_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&document_strategy(), |document| {
            let decoded = codec::decode(&codec::encode(&document));
            prop_assert_eq!(decoded, Some(document));
            Ok(())
        })
        .unwrap();
}

/// Encoding is deterministic: equal documents produce identical text.
#[test]
fn test_encode_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&document_strategy(), |document| {
            prop_assert_eq!(codec::encode(&document), codec::encode(&document.clone()));
            Ok(())
        })
        .unwrap();
}

/// Merging the same snapshot twice is a no-op the second time.
#[test]
fn test_merge_idempotence_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    let strategy = (
        document_strategy(),
        "/[a-z]{1,10}",
        prop::collection::vec(entry_strategy(), 0..8),
    );
    runner
        .run(&strategy, |(document, root, entries)| {
            let buffer = codec::encode(&document);
            let snapshot = Snapshot::from_records(root, entries);

            let once = merge::merge(&buffer, snapshot.clone());
            let twice = merge::merge(&codec::encode(&once.document), snapshot);

            prop_assert_eq!(once.document, twice.document);
            Ok(())
        })
        .unwrap();
}

/// After a merge exactly one snapshot carries the merged root path, and every
/// other snapshot is untouched.
#[test]
fn test_merge_uniqueness_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    let strategy = (
        document_strategy(),
        "/[a-z]{1,10}",
        prop::collection::vec(entry_strategy(), 0..8),
    );
    runner
        .run(&strategy, |(document, root, entries)| {
            let buffer = codec::encode(&document);
            let snapshot = Snapshot::from_records(root.clone(), entries);
            let outcome = merge::merge(&buffer, snapshot);

            let matching = outcome
                .document
                .snapshots
                .iter()
                .filter(|s| s.root_path == root)
                .count();
            prop_assert_eq!(matching, 1);

            let others_before: Vec<_> = document
                .snapshots
                .iter()
                .filter(|s| s.root_path != root)
                .collect();
            let others_after: Vec<_> = outcome
                .document
                .snapshots
                .iter()
                .filter(|s| s.root_path != root)
                .collect();
            prop_assert_eq!(others_before, others_after);
            Ok(())
        })
        .unwrap();
}
