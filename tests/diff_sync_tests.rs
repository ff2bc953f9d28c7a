mod common;

use common::{table_node, FakeDocument};
use gridcheck::{Differ, ErrorKind, Grid, MismatchReport, SyncConfig};
use std::time::Duration;

fn fast_sync() -> SyncConfig {
    SyncConfig {
        timeout: Duration::from_millis(40),
        poll_interval: Duration::from_millis(1),
    }
}

#[test]
fn matching_table_diffs_clean() {
    let document = FakeDocument::new().mount(
        "table",
        table_node(&["A", "B"], &[&["1", "2"]]),
    );
    let expected = Grid::from_rows(vec![vec!["A", "B"], vec!["1", "2"]]);
    Differ::table()
        .diff(&document, &expected)
        .expect("identical grids");
    assert_eq!(document.find_count(), 1);
}

#[test]
fn missing_region_matches_a_conventionally_empty_expectation() {
    let document = FakeDocument::new();
    let expected = Grid::from_rows(vec![Vec::<String>::new()]);
    Differ::table()
        .allow_not_found()
        .diff(&document, &expected)
        .expect("nothing expected, nothing found");
}

#[test]
fn mismatch_names_the_differing_row_and_carries_both_grids() {
    let document = FakeDocument::new().mount(
        "table",
        table_node(&["A"], &[&["1"], &["2"]]),
    );
    let expected = Grid::from_rows(vec![vec!["A"], vec!["1"], vec!["3"]]);
    let err = Differ::table()
        .sync_config(fast_sync())
        .diff(&document, &expected)
        .expect_err("third row differs");
    assert_eq!(err.kind(), ErrorKind::StructuralMismatch);
    assert!(err.to_string().contains("row 2"));

    let report = MismatchReport::from_error(&err).expect("mismatch carries grids");
    assert_eq!(report.expected[2], vec!["3"]);
    assert_eq!(report.actual[2], vec!["2"]);
    let json = report.to_json().expect("serialize report");
    assert!(json.contains("\"expected\""));
}

#[test]
fn transient_document_errors_are_absorbed_within_the_deadline() {
    let document = FakeDocument::new().mount(
        "table",
        table_node(&["A"], &[&["1"]]),
    );
    document.enqueue_transient("still rendering", 2);
    let expected = Grid::from_rows(vec![vec!["A"], vec!["1"]]);
    Differ::table()
        .sync_config(SyncConfig {
            timeout: Duration::from_millis(500),
            poll_interval: Duration::from_millis(1),
        })
        .diff(&document, &expected)
        .expect("third read succeeds");
    assert_eq!(document.find_count(), 3);
}

#[test]
fn deadline_expiry_surfaces_the_last_transient_error() {
    let document = FakeDocument::new();
    document.enqueue_transient("still rendering", 10_000);
    let expected = Grid::from_rows(vec![vec!["A"]]);
    let err = Differ::table()
        .sync_config(fast_sync())
        .diff(&document, &expected)
        .expect_err("document never settles");
    assert_eq!(err.kind(), ErrorKind::TransientDocument);
    assert!(document.find_count() > 1);
}

#[test]
fn comparison_mismatches_retry_until_the_document_settles() {
    // First read serves a half-rendered table; the steady state matches.
    let document = FakeDocument::new().mount(
        "table",
        table_node(&["A"], &[&["1"], &["2"]]),
    );
    document.enqueue_root(table_node(&["A"], &[&["1"]]));
    let expected = Grid::from_rows(vec![vec!["A"], vec!["1"], vec!["2"]]);
    Differ::table()
        .sync_config(SyncConfig {
            timeout: Duration::from_millis(500),
            poll_interval: Duration::from_millis(1),
        })
        .diff(&document, &expected)
        .expect("second extraction sees the full table");
    assert_eq!(document.find_count(), 2);
}

#[test]
fn missing_locator_is_fatal_by_default() {
    let document = FakeDocument::new();
    let expected = Grid::from_rows(vec![vec!["A"]]);
    let err = Differ::table()
        .sync_config(fast_sync())
        .diff(&document, &expected)
        .expect_err("nothing mounted");
    assert_eq!(err.kind(), ErrorKind::LocatorNotFound);
    assert_eq!(document.find_count(), 1);
}

#[test]
fn opted_in_missing_locator_retries_until_the_region_appears() {
    let document = FakeDocument::new().mount(
        "table",
        table_node(&["A"], &[&["1"]]),
    );
    document.enqueue_not_found("table", 2);
    let expected = Grid::from_rows(vec![vec!["A"], vec!["1"]]);
    Differ::table()
        .retry_not_found()
        .sync_config(SyncConfig {
            timeout: Duration::from_millis(500),
            poll_interval: Duration::from_millis(1),
        })
        .diff(&document, &expected)
        .expect("region appears on the third read");
    assert_eq!(document.find_count(), 3);
}

#[test]
fn surplus_rows_pass_with_lenient_options() {
    let document = FakeDocument::new().mount(
        "table",
        table_node(&["A"], &[&["1"], &["2"]]),
    );
    let expected = Grid::from_rows(vec![vec!["A"], vec!["1"]]);
    Differ::table()
        .compare_options(gridcheck::CompareOptions {
            allow_surplus_rows: true,
            ..Default::default()
        })
        .diff(&document, &expected)
        .expect("extra actual rows are tolerated");
}
