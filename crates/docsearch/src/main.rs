use docsearch::components::App as DocsearchApp;
use dioxus::prelude::*;

const MAIN_CSS: Asset = asset!("/assets/docsearch.css");

fn main() {
    // Initialize cross-platform logger (web console + stdout)
    // Use DEBUG level for development builds, INFO for release builds
    #[cfg(debug_assertions)]
    dioxus::logger::init(dioxus::logger::tracing::Level::DEBUG).expect("logger failed to init");
    #[cfg(not(debug_assertions))]
    dioxus::logger::init(dioxus::logger::tracing::Level::INFO).expect("logger failed to init");

    #[cfg(feature = "web")]
    {
        dioxus::launch(App);
    }
}

#[component]
fn App() -> Element {
    rsx! {
        document::Stylesheet { href: MAIN_CSS }
        DocsearchApp {}
    }
}
