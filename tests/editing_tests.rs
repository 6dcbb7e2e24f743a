use tablegen::state::editing::{self, EditingState};
use tablegen::state::selection::CellPosition;
use tablegen::state::tabular::CellData;

#[test]
fn test_filter_escapes_bare_ampersand() {
    assert_eq!(editing::filter_input("x & y"), r"x \& y");
    assert_eq!(editing::filter_input("&&"), r"\&\&");
}

#[test]
fn test_filter_keeps_escaped_ampersand() {
    assert_eq!(editing::filter_input(r"A \& B"), r"A \& B");
}

#[test]
fn test_filter_is_idempotent_for_ampersands() {
    let once = editing::filter_input("A & B & C");
    assert_eq!(once, r"A \& B \& C");
    assert_eq!(editing::filter_input(&once), once);
}

#[test]
fn test_filter_deletes_double_backslash() {
    assert_eq!(editing::filter_input(r"a\\b"), "ab");
    assert_eq!(editing::filter_input(r"a\\\\b"), "ab");
    assert_eq!(editing::filter_input(r"line one \\"), "line one ");
}

#[test]
fn test_filter_odd_backslash_run_keeps_one() {
    assert_eq!(editing::filter_input(r"a\\\b"), r"a\b");
}

#[test]
fn test_filter_escape_check_uses_raw_input() {
    // The & is preceded by a backslash, so it is not escaped; the pair
    // deletion then removes both backslashes.
    assert_eq!(editing::filter_input(r"\\&"), "&");
}

#[test]
fn test_filter_leaves_other_characters() {
    let input = r"$\alpha$ 50% {x} _ # ~ é";
    assert_eq!(editing::filter_input(input), input);
}

#[test]
fn test_start_editing_sets_buffer() {
    let mut state = EditingState::new();
    assert!(!state.is_active());

    state.start_editing(CellPosition::new(1, 2), "foo".to_string());
    assert!(state.is_editing(CellPosition::new(1, 2)));
    assert_eq!(state.cell().map(|cell| cell.content.as_str()), Some("foo"));
}

#[test]
fn test_start_editing_cell_trims_content() {
    let mut state = EditingState::new();
    state.start_editing(CellPosition::new(0, 0), "previous".to_string());

    state.start_editing_cell(CellPosition::new(2, 1), &CellData::new("  foo \n"));
    assert_eq!(state.cell().map(|cell| cell.content.as_str()), Some("foo"));
    assert!(state.is_editing(CellPosition::new(2, 1)));
    assert!(!state.is_editing(CellPosition::new(0, 0)));
}

#[test]
fn test_only_one_cell_edits_at_a_time() {
    let mut state = EditingState::new();
    state.start_editing(CellPosition::new(0, 0), "a".to_string());
    state.start_editing(CellPosition::new(3, 1), "b".to_string());

    assert!(!state.is_editing(CellPosition::new(0, 0)));
    assert!(state.is_editing(CellPosition::new(3, 1)));
    let editing_cells = (0..4)
        .flat_map(|row| (0..4).map(move |column| CellPosition::new(row, column)))
        .filter(|position| state.is_editing(*position))
        .count();
    assert_eq!(editing_cells, 1);
}

#[test]
fn test_update_from_input_sanitizes() {
    let mut state = EditingState::new();
    state.start_editing(CellPosition::new(0, 0), String::new());
    state.update_from_input("Tom & Jerry");
    assert_eq!(state.cell().unwrap().content, r"Tom \& Jerry");
}

#[test]
fn test_update_without_active_cell_is_noop() {
    let mut state = EditingState::new();
    state.update_from_input("ignored");
    assert_eq!(state, EditingState::new());
}

#[test]
fn test_commit_and_cancel_leave_edit_mode() {
    let mut state = EditingState::new();
    state.start_editing(CellPosition::new(2, 0), "x".to_string());
    state.update_content("y".to_string());

    let committed = state.commit().expect("a cell was being edited");
    assert_eq!((committed.row, committed.column), (2, 0));
    assert_eq!(committed.content, "y");
    assert!(!state.is_active());
    assert!(state.commit().is_none());

    state.start_editing(CellPosition::new(0, 0), "z".to_string());
    state.cancel();
    assert!(!state.is_active());
}
