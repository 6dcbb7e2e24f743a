use std::rc::Rc;

use dioxus::html::input_data::MouseButton;
use dioxus::prelude::{Key, Modifiers, *};

use crate::render::{self, TypesetSlot};
use crate::state::editing::EditingState;
use crate::state::selection::{
    CellPosition, PointerButton, PointerPress, SelectionFlags, SelectionState,
};
use crate::state::tabular::{self, CellData, ColumnDefinition, RowData};

#[component]
pub fn Cell(
    cell_data: CellData,
    column_specification: ColumnDefinition,
    row_index: usize,
    column_index: usize,
    row: RowData,
    selection: Signal<SelectionState>,
    editing: Signal<EditingState>,
    on_commit: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let position = CellPosition::new(row_index, column_index);
    let editing_here = use_memo(move || editing.read().is_editing(position));
    let is_editing = editing_here();
    let flags = selection.read().flags(position);
    let content = cell_data.content.trim().to_string();

    let input_handle = use_signal::<Option<Rc<MountedData>>>(|| None);
    let rendered = use_signal(String::new);
    let slot = use_signal(TypesetSlot::default);

    // Focus on entering edit mode, once the input has mounted.
    use_effect(move || {
        let handle = input_handle.read().clone();
        match (editing_here(), handle) {
            (true, Some(handle)) => {
                spawn(async move {
                    if let Err(err) = handle.set_focus(true).await {
                        tracing::debug!("could not focus cell input: {err:?}");
                    }
                });
            }
            (false, Some(_)) => {
                let mut input_handle = input_handle;
                input_handle.set(None);
            }
            _ => {}
        }
    });

    // Dropping this resource (new inputs or unmount) cancels any math
    // typesetting still in flight.
    let _typeset = use_resource(use_reactive(
        (&content, &is_editing),
        move |(content, is_editing)| async move {
            let mut slot = slot;
            let mut rendered = rendered;
            if is_editing {
                slot.write().invalidate();
                return;
            }

            let ticket = slot.write().begin();
            let published =
                render::render_pass(&content, ticket, |ticket| slot.peek().is_current(ticket)).await;
            match published {
                Some(html) => rendered.set(html),
                None => tracing::debug!(
                    row = position.row,
                    column = position.column,
                    "dropping stale render"
                ),
            }
        },
    ));

    let body = if is_editing {
        let value = editing
            .read()
            .cell()
            .map(|cell| cell.content.clone())
            .unwrap_or_default();
        rsx! {
            input {
                class: "table-generator-cell-input",
                id: format!("cell-input-{row_index}-{column_index}"),
                value: "{value}",
                style: "width: inherit",
                onmounted: move |evt| {
                    let mut input_handle = input_handle;
                    input_handle.set(Some(evt.data()));
                },
                oninput: move |evt| {
                    let mut editing = editing;
                    editing.with_mut(|state| state.update_from_input(&evt.value()));
                },
                onkeydown: move |evt| {
                    match evt.key() {
                        Key::Enter => on_commit.call(()),
                        Key::Escape => on_cancel.call(()),
                        _ => {}
                    }
                },
                onblur: move |_| {
                    if editing.peek().is_editing(position) {
                        on_commit.call(());
                    }
                },
            }
        }
    } else {
        rsx! {
            div { class: "table-generator-cell-render", dangerous_inner_html: "{rendered}" }
        }
    };

    rsx! {
        td {
            class: cell_class(&column_specification, &row, flags),
            id: format!("cell-{row_index}-{column_index}"),
            tabindex: "{tabular::tab_index(row.cells.len(), row_index, column_index)}",
            onmousedown: move |evt: MouseEvent| {
                let press = pointer_press(&evt);
                let mut selection = selection;
                if selection.with_mut(|state| state.press(press, position)).is_handled() {
                    evt.stop_propagation();
                }
            },
            ondoubleclick: move |_| {
                let mut editing = editing;
                tracing::debug!(cell = %position.label(), "start editing");
                editing.with_mut(|state| state.start_editing_cell(position, &cell_data));
            },
            {body}
        }
    }
}

pub fn pointer_button(button: Option<MouseButton>) -> PointerButton {
    match button {
        Some(MouseButton::Primary) => PointerButton::Primary,
        Some(MouseButton::Secondary) => PointerButton::Secondary,
        Some(MouseButton::Auxiliary) => PointerButton::Auxiliary,
        _ => PointerButton::Other,
    }
}

fn pointer_press(evt: &MouseEvent) -> PointerPress {
    PointerPress {
        button: pointer_button(evt.trigger_button()),
        shift: evt.modifiers().contains(Modifiers::SHIFT),
    }
}

/// CSS classes for a cell: table borders, alignment, and selection state.
pub fn cell_class(column: &ColumnDefinition, row: &RowData, flags: SelectionFlags) -> String {
    let classes = [
        ("table-generator-cell", true),
        ("table-generator-cell-border-left", column.border_left > 0),
        ("table-generator-cell-border-right", column.border_right > 0),
        ("table-generator-row-border-top", row.border_top > 0),
        ("table-generator-row-border-bottom", row.border_bottom > 0),
        (column.alignment.class_name(), true),
        ("focused", flags.focused),
        ("selection-edge-top", flags.top),
        ("selection-edge-bottom", flags.bottom),
        ("selection-edge-left", flags.left),
        ("selection-edge-right", flags.right),
    ];

    classes
        .iter()
        .filter_map(|(name, enabled)| enabled.then_some(*name))
        .collect::<Vec<_>>()
        .join(" ")
}
