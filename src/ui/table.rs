use dioxus::prelude::*;

use crate::state::editing::EditingState;
use crate::state::i18n::{self, Language};
use crate::state::selection::{PointerButton, SelectionState};
use crate::state::tabular::TableData;
use crate::ui::cell::{pointer_button, Cell};

#[component]
pub fn Table(
    data: Signal<TableData>,
    language: Signal<Language>,
    selection: Signal<SelectionState>,
    editing: Signal<EditingState>,
) -> Element {
    let snapshot = data.read().clone();

    if snapshot.is_empty() {
        let empty_label = i18n::tr(*language.read(), "table.empty");
        return rsx! {
            p { class: "empty-message", id: "empty-message", "{empty_label}" }
        };
    }

    rsx! {
        div {
            class: "table-generator",
            id: "table-generator",
            // Cells stop primary presses, so this only sees presses that
            // land outside every cell.
            onmousedown: move |evt: MouseEvent| {
                if pointer_button(evt.trigger_button()) == PointerButton::Primary {
                    let mut selection = selection;
                    selection.with_mut(|state| state.clear());
                }
            },
            table { class: "table-generator-table",
                tbody {
                    for (row_index, row) in snapshot.rows.iter().enumerate() {
                        tr { key: "{row_index}", id: format!("row-{row_index}"),
                            for (column_index, cell) in row.cells.iter().enumerate() {
                                Cell {
                                    key: "{row_index}-{column_index}",
                                    cell_data: cell.clone(),
                                    column_specification: snapshot.column(column_index).cloned().unwrap_or_default(),
                                    row_index,
                                    column_index,
                                    row: row.clone(),
                                    selection,
                                    editing,
                                    on_commit: move |_| commit_edit(data, editing),
                                    on_cancel: move |_| cancel_edit(editing),
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Writes the edit buffer back into the table and leaves edit mode.
pub fn commit_edit(mut data: Signal<TableData>, mut editing: Signal<EditingState>) {
    let Some(edit) = editing.with_mut(|state| state.commit()) else {
        return;
    };
    let changed =
        data.with_mut(|table| table.set_cell_content(edit.row, edit.column, &edit.content));
    tracing::debug!(row = edit.row, column = edit.column, changed, "committed cell edit");
}

pub fn cancel_edit(mut editing: Signal<EditingState>) {
    editing.with_mut(|state| state.cancel());
}
