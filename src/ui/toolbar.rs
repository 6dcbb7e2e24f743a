use dioxus::prelude::*;

use crate::state::editing::EditingState;
use crate::state::i18n::{self, Language};
use crate::state::selection::SelectionState;

#[component]
pub fn Toolbar(
    language: Signal<Language>,
    selection: Signal<SelectionState>,
    editing: Signal<EditingState>,
    error_message: Signal<Option<String>>,
) -> Element {
    let current_language = *language.read();
    let status = status_text(current_language, &selection.read(), &editing.read());

    let language_label = i18n::tr(current_language, "language.label");
    let hint_label = i18n::tr(current_language, "toolbar.hint");
    let error_text = error_message
        .read()
        .as_ref()
        .map(|message| format!("{}: {message}", i18n::tr(current_language, "error.load")));

    rsx! {
        div { class: "toolbar",
            div { class: "toolbar-group",
                label { class: "toolbar-label", r#for: "select-language", "{language_label}" }
                select {
                    class: "toolbar-select toolbar-select-sm",
                    id: "select-language",
                    value: "{current_language.code()}",
                    onchange: move |evt| {
                        if let Some(next_language) = Language::from_code(&evt.value()) {
                            language.set(next_language);
                        }
                    },
                    for lang in Language::all().iter().copied() {
                        option { value: "{lang.code()}", "{i18n::tr(current_language, lang.label_key())}" }
                    }
                }
            }
            div { class: "toolbar-separator" }
            div { class: "toolbar-group",
                span { class: "toolbar-status", id: "selection-status", "{status}" }
            }
            div { class: "toolbar-separator" }
            div { class: "toolbar-group",
                span { class: "toolbar-hint", "{hint_label}" }
            }
            if let Some(text) = error_text {
                div { class: "toolbar-error", id: "error-message",
                    "{text}"
                    button {
                        class: "toolbar-btn toolbar-btn-sm",
                        onclick: move |_| error_message.set(None),
                        "\u{2715}"
                    }
                }
            }
        }
    }
}

/// Status line for the toolbar; edit mode takes precedence over selection.
pub fn status_text(
    language: Language,
    selection: &SelectionState,
    editing: &EditingState,
) -> String {
    if let Some(cell) = editing.cell() {
        let label = cell.position().label();
        return i18n::tr_with(language, "toolbar.editing", &[("cell", &label)]);
    }

    let Some(current) = selection.current() else {
        return i18n::tr(language, "toolbar.selection_none").to_string();
    };

    if current.from == current.to {
        let label = current.from.label();
        return i18n::tr_with(language, "toolbar.selection_single", &[("cell", &label)]);
    }

    let from = current.from.label();
    let to = current.to.label();
    let rows = current.height().to_string();
    let columns = current.width().to_string();
    i18n::tr_with(
        language,
        "toolbar.selection_range",
        &[("from", &from), ("to", &to), ("rows", &rows), ("columns", &columns)],
    )
}
