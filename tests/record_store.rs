use printlayout::LayoutError;
use printlayout::table::{Cell, RecordStore, RowsSource};

fn header() -> Vec<Cell> {
    ["Photo", "Size", "Order", "Name", "Color", "Article"]
        .into_iter()
        .map(Cell::from)
        .collect()
}

fn row(cells: [&str; 6]) -> Vec<Cell> {
    cells.into_iter().map(Cell::from).collect()
}

#[test]
fn parses_rows_after_header_in_order() {
    let rows = vec![
        header(),
        row(["img1.png", "M", "1001", "Tiger", "black", "ART-001"]),
        row(["", "L", "1002", "Wolf", "", "ART-002"]),
    ];
    let store = RecordStore::from_rows(&rows).unwrap();
    assert_eq!(store.len(), 2);

    let first = store.get(0).unwrap();
    assert_eq!(first.index, 0);
    assert_eq!(first.source_row, 1);
    assert_eq!(first.image_ref.as_deref(), Some("img1.png"));
    assert_eq!(first.nominal_size, "M");
    assert_eq!(first.order_id, "1001");
    assert_eq!(first.display_name, "Tiger");
    assert_eq!(first.color, "black");
    assert_eq!(first.article_code, "ART-001");
    assert!(first.layer_match.is_none());

    let second = store.get(1).unwrap();
    assert_eq!(second.index, 1);
    assert_eq!(second.image_ref, None);
    assert_eq!(second.color_label(), "not specified");
}

#[test]
fn empty_rows_are_skipped_and_indices_stay_dense() {
    let rows = vec![
        header(),
        vec![],
        row(["", "", "", "", "", ""]),
        row(["", "S", "", "", "", "ART-9"]),
    ];
    let store = RecordStore::from_rows(&rows).unwrap();
    assert_eq!(store.len(), 1);
    let r = store.get(0).unwrap();
    assert_eq!(r.index, 0);
    assert_eq!(r.source_row, 3);
}

#[test]
fn blank_article_and_size_default_to_unknown() {
    let rows = vec![header(), row(["", "", "7", "", "red", ""])];
    let store = RecordStore::from_rows(&rows).unwrap();
    let r = store.get(0).unwrap();
    assert_eq!(r.article_code, "Unknown");
    assert_eq!(r.nominal_size, "Unknown");
    assert_eq!(r.order_id, "7");
}

#[test]
fn short_rows_and_numbers_are_accepted() {
    let rows = vec![
        header(),
        vec![Cell::Empty, Cell::Number(42.0), Cell::Number(1003.5)],
    ];
    let store = RecordStore::from_rows(&rows).unwrap();
    let r = store.get(0).unwrap();
    assert_eq!(r.nominal_size, "42");
    assert_eq!(r.order_id, "1003.5");
    assert_eq!(r.article_code, "Unknown");
}

#[test]
fn zero_and_false_cells_read_as_blank() {
    let rows = vec![
        header(),
        vec![
            Cell::Empty,
            Cell::Number(0.0),
            Cell::Bool(false),
            Cell::Number(10.0),
            Cell::Empty,
            Cell::Number(0.0),
        ],
    ];
    let store = RecordStore::from_rows(&rows).unwrap();
    let r = store.get(0).unwrap();
    assert_eq!(r.article_code, "Unknown");
    assert_eq!(r.nominal_size, "Unknown");
    assert_eq!(r.order_id, "");
    assert_eq!(r.display_name, "10");
    assert!(!r.matches_layer_name("Layer 10"));
}

#[test]
fn empty_table_is_source_unavailable() {
    let err = RecordStore::from_rows(&[]).unwrap_err();
    assert!(matches!(err, LayoutError::SourceUnavailable(_)));
}

#[test]
fn header_only_table_is_empty_but_valid() {
    let store = RecordStore::from_rows(&[header()]).unwrap();
    assert!(store.is_empty());
}

#[test]
fn error_cell_is_parse_failure() {
    let mut bad = row(["", "M", "", "", "", "ART-1"]);
    bad[5] = Cell::Error("#REF!".into());
    let err = RecordStore::from_rows(&[header(), bad]).unwrap_err();
    assert!(matches!(err, LayoutError::ParseFailure(ref m) if m.contains("#REF!")));
}

#[test]
fn load_reads_from_source() {
    let mut source = RowsSource::new(vec![header(), row(["", "M", "", "", "", "A"])]);
    let store = RecordStore::load(&mut source).unwrap();
    assert_eq!(store.records()[0].article_code, "A");
}
