//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Window};

use crate::core::error::HostError;

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get the document of the current window.
#[inline]
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Check whether `target` exposes a property named `name`.
///
/// Same as the JavaScript `name in target` test.
pub fn has_property(target: &JsValue, name: &str) -> bool {
    Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
}

/// Look up `target[name]` as a function.
pub fn get_method(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

/// Read a property as a string.
pub fn get_string(target: &JsValue, name: &str) -> Option<String> {
    Reflect::get(target, &JsValue::from_str(name)).ok()?.as_string()
}

/// Check if this page is the top-level browsing context.
///
/// Returns `false` inside a nested frame, and when `window.top` cannot be
/// read at all.
pub fn is_top_level(window: &Window) -> bool {
    match window.top() {
        Ok(Some(top)) => Object::is(&JsValue::from(window.self_()), &JsValue::from(top)),
        _ => false,
    }
}

/// Split a thrown/rejected JavaScript value into kind and message.
///
/// `Error` and `DOMException` objects provide `name` and `message`; anything
/// else is reported as a generic `Error` with its debug rendering.
pub fn host_error(value: &JsValue) -> HostError {
    if let Some(text) = value.as_string() {
        return HostError::new("Error", text);
    }

    let kind = get_string(value, "name").unwrap_or_else(|| "Error".to_string());
    let message = get_string(value, "message").unwrap_or_else(|| format!("{:?}", value));
    HostError::new(kind, message)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_test_page_is_top_level() {
        let window = window().expect("window");
        assert!(is_top_level(&window));
    }

    #[wasm_bindgen_test]
    fn test_host_error_reads_dom_exception() {
        let err = js_sys::Error::new("The user aborted a request.");
        err.set_name("AbortError");

        let host = host_error(&err.into());
        assert!(host.is_abort());
        assert_eq!(host.message, "The user aborted a request.");
    }

    #[wasm_bindgen_test]
    fn test_has_property() {
        let window = window().expect("window");
        assert!(has_property(&window, "document"));
        assert!(!has_property(&window, "definitelyNotAnApi"));
    }
}
