//! Thin wrappers over `window.location` and `window.history`. Host builds have no
//! window, so the wrappers degrade to no-ops there.

#[cfg(target_arch = "wasm32")]
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_path() -> String {
    String::new()
}

#[cfg(target_arch = "wasm32")]
pub fn origin() -> Option<String> {
    web_sys::window().and_then(|w| w.location().origin().ok())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn origin() -> Option<String> {
    None
}

/// Loads `path` as a fresh page.
#[cfg(target_arch = "wasm32")]
pub fn navigate_to(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().set_href(path) {
            log::error!("navigation to {} failed: {:?}", path, err);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn navigate_to(path: &str) {
    log::debug!("navigate_to({}) ignored outside the browser", path);
}

/// Pushes `path` onto the history and tells the router, so in-memory state
/// such as queued toasts survives. Falls back to a full load on failure.
#[cfg(target_arch = "wasm32")]
pub fn navigate_in_app(path: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let routed = window
        .history()
        .and_then(|history| {
            history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path))
        })
        .and_then(|_| web_sys::Event::new("popstate"))
        .and_then(|event| window.dispatch_event(&event));
    if let Err(err) = routed {
        log::warn!("in-app navigation to {} failed: {:?}", path, err);
        navigate_to(path);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn navigate_in_app(path: &str) {
    log::debug!("navigate_in_app({}) ignored outside the browser", path);
}

/// Sends the browser to `/` unless it is already there.
pub fn redirect_to_entry() {
    if current_path() == crate::router::LOGIN_PATH {
        return;
    }
    navigate_to(crate::router::LOGIN_PATH);
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen::{closure::Closure, JsCast};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn in_app_navigation_updates_path_without_reload() {
        let window = web_sys::window().unwrap();
        let notified = Rc::new(Cell::new(0));
        let counter = notified.clone();
        let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            counter.set(counter.get() + 1);
        });
        window
            .add_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref())
            .unwrap();

        navigate_in_app("/hr/shift");

        assert_eq!(current_path(), "/hr/shift");
        assert_eq!(notified.get(), 1);
        window
            .remove_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref())
            .unwrap();
    }
}
