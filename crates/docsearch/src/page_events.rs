//! Page-wide event bindings.
//!
//! Results close on a click anywhere outside the search widget and on Escape
//! anywhere on the page, so these listeners live on the document rather than
//! on a component.

use std::rc::Rc;

use docsearch_core::SearchSession;

/// Element wrapping the search box, its results and the help button.
pub const WIDGET_ID: &str = "search-box-container";

/// A page event the search session cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    ClickOutside,
    Escape,
}

/// Classifies a document click by whether it landed inside the widget.
pub fn classify_click(inside_widget: bool) -> Option<PageEvent> {
    (!inside_widget).then_some(PageEvent::ClickOutside)
}

/// Classifies a document keyup by its `KeyboardEvent.key`.
pub fn classify_keyup(key: &str) -> Option<PageEvent> {
    (key == "Escape").then_some(PageEvent::Escape)
}

/// Forwards `event` to the session.
pub fn dispatch(session: &SearchSession, event: PageEvent) {
    match event {
        PageEvent::ClickOutside => session.on_click_outside(),
        PageEvent::Escape => session.on_escape(),
    }
}

/// Registers the document listeners for the lifetime of the page.
#[cfg(target_arch = "wasm32")]
pub fn bind_document(session: Rc<SearchSession>) {
    use dioxus::logger::tracing::{debug, warn};
    use wasm_bindgen::prelude::Closure;
    use wasm_bindgen::JsCast;

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        warn!("No document, page events not bound");
        return;
    };

    let click_session = Rc::clone(&session);
    let on_click = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let inside_widget = event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            .and_then(|element| element.closest(&format!("#{}", WIDGET_ID)).ok().flatten())
            .is_some();
        if let Some(page_event) = classify_click(inside_widget) {
            dispatch(&click_session, page_event);
        }
    }) as Box<dyn FnMut(web_sys::Event)>);

    let on_keyup = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
        if let Some(page_event) = classify_keyup(&event.key()) {
            dispatch(&session, page_event);
        }
    }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);

    if let Err(e) =
        document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
    {
        warn!("Failed to bind document click: {:?}", e);
    }
    if let Err(e) =
        document.add_event_listener_with_callback("keyup", on_keyup.as_ref().unchecked_ref())
    {
        warn!("Failed to bind document keyup: {:?}", e);
    }

    // Listeners stay registered until the page unloads
    on_click.forget();
    on_keyup.forget();
    debug!("Page events bound");
}

/// Native hosts have no page to listen on.
#[cfg(not(target_arch = "wasm32"))]
pub fn bind_document(_session: Rc<SearchSession>) {}
