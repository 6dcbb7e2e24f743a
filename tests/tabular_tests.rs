use tablegen::state::selection::{CellPosition, SelectionFlags, SelectionState, TableSelection};
use tablegen::state::tabular::{
    self, Alignment, CellData, ColumnDefinition, RowData, TableData, TableError,
};
use tablegen::ui::cell;

fn two_by_two() -> TableData {
    TableData {
        columns: vec![
            ColumnDefinition::new(Alignment::Left),
            ColumnDefinition::new(Alignment::Right),
        ],
        rows: vec![
            RowData::from_contents(["a", "b"]),
            RowData::from_contents(["c", "d"]),
        ],
    }
}

#[test]
fn test_sample_table_is_valid() {
    let table = TableData::sample();
    assert!(table.validate().is_ok());
    assert!(!table.is_empty());
    assert_eq!(table.column_count(), 3);
}

#[test]
fn test_set_cell_content_reports_changes() {
    let mut table = two_by_two();
    assert!(table.set_cell_content(1, 0, "x"));
    assert_eq!(table.cell(1, 0), Some(&CellData::new("x")));
    assert!(!table.set_cell_content(1, 0, "x"));
}

#[test]
fn test_set_cell_content_out_of_range_is_noop() {
    let mut table = two_by_two();
    let before = table.clone();
    assert!(!table.set_cell_content(5, 0, "x"));
    assert!(!table.set_cell_content(0, 9, "x"));
    assert_eq!(table, before);
}

#[test]
fn test_validate_rejects_ragged_rows() {
    let mut table = two_by_two();
    table.rows.push(RowData::from_contents(["only one"]));
    assert_eq!(
        table.validate(),
        Err(TableError::RaggedRow {
            row: 2,
            expected: 2,
            found: 1,
        })
    );
    assert_eq!(
        table.validate().unwrap_err().to_string(),
        "row 3 has 1 cells but the table defines 2 columns"
    );
}

#[test]
fn test_empty_table() {
    assert!(TableData::new().is_empty());
    let no_columns = TableData {
        columns: Vec::new(),
        rows: vec![RowData::default()],
    };
    assert!(no_columns.is_empty());
}

#[test]
fn test_tab_index_is_row_major_from_one() {
    assert_eq!(tabular::tab_index(3, 0, 0), 1);
    assert_eq!(tabular::tab_index(3, 0, 2), 3);
    assert_eq!(tabular::tab_index(3, 1, 0), 4);
    assert_eq!(tabular::tab_index(3, 2, 1), 8);
}

#[test]
fn test_cell_class_for_plain_cell() {
    let column = ColumnDefinition::default();
    let row = RowData::default();
    assert_eq!(
        cell::cell_class(&column, &row, SelectionFlags::default()),
        "table-generator-cell alignment-left"
    );
}

#[test]
fn test_cell_class_borders_and_alignment() {
    let column = ColumnDefinition {
        alignment: Alignment::Paragraph,
        border_left: 1,
        border_right: 2,
    };
    let row = RowData {
        cells: Vec::new(),
        border_top: 0,
        border_bottom: 1,
    };
    assert_eq!(
        cell::cell_class(&column, &row, SelectionFlags::default()),
        "table-generator-cell table-generator-cell-border-left \
         table-generator-cell-border-right table-generator-row-border-bottom \
         alignment-paragraph"
    );
}

#[test]
fn test_cell_class_selection_edges() {
    let mut selection = SelectionState::new();
    selection.set(Some(TableSelection::new(
        CellPosition::new(0, 0),
        CellPosition::new(1, 1),
    )));
    let column = ColumnDefinition::new(Alignment::Center);
    let row = RowData::default();

    assert_eq!(
        cell::cell_class(&column, &row, selection.flags(CellPosition::new(0, 1))),
        "table-generator-cell alignment-center focused selection-edge-top selection-edge-right"
    );
    assert_eq!(
        cell::cell_class(&column, &row, selection.flags(CellPosition::new(2, 1))),
        "table-generator-cell alignment-center"
    );
}

#[test]
fn test_table_deserializes_with_defaults() {
    let table: TableData = serde_json::from_str(
        r#"{"columns":[{"alignment":"center"},{}],"rows":[{"cells":[{"content":"a"},{"content":"b"}],"border_top":1}]}"#,
    )
    .unwrap();
    assert_eq!(table.columns[0].alignment, Alignment::Center);
    assert_eq!(table.columns[1], ColumnDefinition::default());
    assert_eq!(table.rows[0].border_top, 1);
    assert_eq!(table.rows[0].border_bottom, 0);
}
