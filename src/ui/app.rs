use dioxus::prelude::*;

use crate::config::AppConfig;
use crate::io::json_io;
use crate::state::editing::EditingState;
use crate::state::selection::SelectionState;
use crate::state::tabular::TableData;
use crate::ui::table::Table;
use crate::ui::toolbar::Toolbar;

const STYLES: Asset = asset!("/assets/styles.css");

#[component]
pub fn App() -> Element {
    let config = use_hook(AppConfig::from_env);
    let data = use_signal(TableData::sample);
    let language = use_signal(|| config.language);
    let error_message = use_signal::<Option<String>>(|| None);
    let selection = use_signal(SelectionState::new);
    let editing = use_signal(EditingState::new);

    use_effect({
        let mut data = data;
        let mut error_message = error_message;
        let open_path = config.open_path.clone();
        move || {
            let Some(path) = open_path.as_ref() else {
                return;
            };
            match json_io::load_table(path) {
                Ok(table) => {
                    data.set(table);
                    error_message.set(None);
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), "failed to load table: {e}");
                    error_message.set(Some(e.to_string()));
                }
            }
        }
    });

    rsx! {
        document::Stylesheet { href: STYLES }
        div { class: "app",
            Toolbar { language, selection, editing, error_message }
            Table { data, language, selection, editing }
        }
    }
}
