mod common;

use common::{list_node, table_node, FakeDocument};
use gridcheck::{Cell, Differ, Grid, HeaderKey, Row};

#[test]
fn replace_header_prepends_a_computed_row_over_all_items() {
    let document = FakeDocument::new().mount("ul", list_node(&["alpha", "beta"]));
    let grid = Differ::unordered_list()
        .replace_header(|| vec!["Item".to_string()])
        .to_grid(&document)
        .expect("list is present");
    assert_eq!(
        grid,
        Grid::from_rows(vec![vec!["Item"], vec!["alpha"], vec!["beta"]])
    );
}

#[test]
fn header_cell_resolves_symbolic_and_literal_keys_alike() {
    let document = FakeDocument::new().mount(
        "table",
        table_node(&["Full Name", "Email"], &[&["Alice", "a@example.com"]]),
    );
    let symbolic = Differ::table()
        .header_cell("full_name", |_| "Name".to_string())
        .to_grid(&document)
        .expect("table is present");
    assert_eq!(symbolic.rows[0][0].text, "Name");

    let literal = Differ::table()
        .header_cell("Full Name", |_| "Name".to_string())
        .to_grid(&document)
        .expect("table is present");
    assert_eq!(literal.rows[0][0].text, "Name");
}

#[test]
fn unknown_header_key_is_a_silent_no_op() {
    let document = FakeDocument::new().mount(
        "table",
        table_node(&["Full Name"], &[&["Alice"]]),
    );
    let grid = Differ::table()
        .header_cell("phone_number", |_| "Phone".to_string())
        .header_cell(HeaderKey::Positional(9), |_| "Ninth".to_string())
        .to_grid(&document)
        .expect("unknown keys never error");
    assert_eq!(
        grid,
        Grid::from_rows(vec![vec!["Full Name"], vec!["Alice"]])
    );
}

#[test]
fn positional_header_key_rewrites_by_index() {
    let document = FakeDocument::new().mount(
        "table",
        table_node(&["A", "B"], &[&["1", "2"]]),
    );
    let grid = Differ::table()
        .header_cell(1usize, |cell| format!("{}!", cell.text))
        .to_grid(&document)
        .expect("table is present");
    assert_eq!(grid.rows[0][1].text, "B!");
}

#[test]
fn map_header_rewrites_the_whole_row_and_renormalizes() {
    let document = FakeDocument::new().mount(
        "table",
        table_node(&["a", "b"], &[&["1", "2"]]),
    );
    let grid = Differ::table()
        .map_header(|row: Row| {
            let mut out: Row = row
                .iter()
                .map(|cell| Cell::synthesized(cell.text.to_uppercase()))
                .collect();
            out.push(Cell::synthesized("C"));
            out
        })
        .to_grid(&document)
        .expect("table is present");
    assert_eq!(
        grid,
        Grid::from_rows(vec![vec!["A", "B", "C"], vec!["1", "2", ""]])
    );
}

#[test]
fn header_transforms_also_apply_to_a_replaced_header() {
    let document = FakeDocument::new().mount("ul", list_node(&["alpha"]));
    let grid = Differ::unordered_list()
        .replace_header(|| vec!["item".to_string()])
        .header_cell("item", |cell| cell.text.to_uppercase())
        .to_grid(&document)
        .expect("list is present");
    assert_eq!(grid.rows[0][0].text, "ITEM");
}
