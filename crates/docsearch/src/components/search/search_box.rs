use dioxus::logger::tracing::debug;
use dioxus::prelude::*;

use crate::components::{use_search_session, use_view};

/// Search input with clear, docstring and help controls
#[component]
pub fn SearchBox() -> Element {
    let session = use_search_session();
    let view = use_view();
    let mut query = use_signal(String::new);
    let mut search_docstrings = use_signal(|| false);

    let on_input = {
        let session = session.clone();
        move |evt: FormEvent| {
            let text = evt.value();
            query.set(text.clone());
            let session = session.clone();
            spawn(async move {
                let outcome = session.on_input(text).await;
                debug!("Input search: {:?}", outcome);
            });
        }
    };

    let on_keyup = {
        let session = session.clone();
        move |evt: KeyboardEvent| {
            if evt.key() == Key::Enter {
                let session = session.clone();
                spawn(async move {
                    let outcome = session.on_enter().await;
                    debug!("Enter search: {:?}", outcome);
                });
            }
        }
    };

    let on_focus = {
        let session = session.clone();
        move |_: FocusEvent| {
            let session = session.clone();
            spawn(async move { session.on_focus().await });
        }
    };

    let on_box_click = {
        let session = session.clone();
        move |evt: MouseEvent| {
            evt.stop_propagation();
            session.on_search_box_click();
        }
    };

    let on_clear = {
        let session = session.clone();
        move |evt: MouseEvent| {
            evt.stop_propagation();
            session.clear_search();
            query.set(String::new());
        }
    };

    let on_docstrings = {
        let session = session.clone();
        move |evt: FormEvent| {
            let enabled = evt.checked();
            search_docstrings.set(enabled);
            let session = session.clone();
            spawn(async move {
                let outcome = session.toggle_docstrings(enabled).await;
                debug!("Docstring toggle search: {:?}", outcome);
            });
        }
    };

    let on_help = {
        let session = session.clone();
        move |evt: MouseEvent| {
            evt.stop_propagation();
            session.toggle_help();
        }
    };

    let clear_display = if (view.clear_button_visible)() {
        "inline-block"
    } else {
        "none"
    };
    let docstrings_class = if search_docstrings() {
        "ds-label ds-label--success"
    } else {
        "ds-label"
    };

    rsx! {
        div { class: "ds-search-box-row",
            input {
                id: "search-box",
                class: "ds-search-input",
                r#type: "search",
                placeholder: "Search",
                autocomplete: "off",
                value: "{query}",
                oninput: on_input,
                onkeyup: on_keyup,
                onfocus: on_focus,
                onclick: on_box_click,
            }
            button {
                id: "search-clear-button",
                class: "ds-btn ds-btn--clear",
                style: "display: {clear_display}",
                title: "Clear",
                onclick: on_clear,
                "×"
            }
            label {
                id: "search-docstrings-button",
                class: "{docstrings_class}",
                onclick: move |evt: MouseEvent| evt.stop_propagation(),
                input {
                    id: "toggle-search-in-docstrings-checkbox",
                    r#type: "checkbox",
                    checked: search_docstrings(),
                    onchange: on_docstrings,
                }
                "In docstrings"
            }
            button {
                id: "search-help-button",
                class: "ds-btn ds-btn--help",
                title: "Search help",
                onclick: on_help,
                "?"
            }
        }
    }
}
