//! Conversions between [`ClientError`] and JavaScript values

use boxoffice_core::ClientError;
use wasm_bindgen::{JsCast, JsValue};

/// Best-effort message out of a thrown JS value
pub fn js_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Turn a client error into a JS `Error`.
///
/// `name` carries the error kind (`NetworkError`, `RequestError`, ...) and
/// request errors also get a numeric `status` property.
pub fn to_js_error(error: &ClientError) -> JsValue {
    let js_error = js_sys::Error::new(&error.to_string());
    js_error.set_name(error.kind());
    if let Some(status) = error.status() {
        if let Err(e) = js_sys::Reflect::set(
            &js_error,
            &JsValue::from_str("status"),
            &JsValue::from(status),
        ) {
            tracing::debug!(error = %js_message(&e), "Could not attach status to JS error");
        }
    }
    js_error.into()
}
