use dioxus::prelude::*;

use crate::components::use_view;

/// Status line, warning box, help text and the result list
#[component]
pub fn ResultsPanel() -> Element {
    let view = use_view();

    let panel_display = if (view.results_visible)() {
        "block"
    } else {
        "none"
    };
    let status = view.status.read().clone();
    let warning = view.warning.read().clone();
    let help_visible = (view.help_visible)();

    rsx! {
        div {
            id: "search-results-container",
            class: "ds-results",
            style: "display: {panel_display}",
            // Clicks inside the panel must not count as clicks outside
            onclick: move |evt: MouseEvent| evt.stop_propagation(),

            if help_visible {
                div { id: "search-help-box", class: "ds-help",
                    p { "Search is run on object names and, optionally, docstrings." }
                    ul {
                        li { code { "+term" } " requires the term, " code { "-term" } " excludes it." }
                        li { code { "name:term" } " only searches the given field (" code { "name" } ", " code { "qname" } ", " code { "docstring" } ")." }
                        li { code { "term*" } " matches prefixes, " code { "term~1" } " allows one typo." }
                    }
                }
            }

            if !warning.is_empty() {
                div { id: "search-warn-box", class: "ds-warning",
                    p { id: "search-warn", "{warning}" }
                }
            }

            p { id: "search-status", class: "ds-status", "{status}" }

            ul { id: "search-results", class: "ds-result-list",
                for fragment in view.results.read().iter() {
                    li {
                        key: "{fragment.id}",
                        class: if fragment.is_public() { "ds-result" } else { "ds-result ds-result--private" },
                        dangerous_inner_html: "{fragment.html}",
                    }
                }
            }
        }
    }
}
