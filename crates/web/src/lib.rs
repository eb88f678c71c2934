//! Browser bindings for the boxoffice session client
//!
//! Exposes the site's page helpers to JavaScript. Calls go through
//! `boxoffice-core`, with `localStorage`, `sessionStorage`, `fetch` and the
//! window plugged in behind its traits.

pub mod browser;
pub mod context;
pub mod dom;
pub mod error;
pub mod logging;
pub mod storage;

use boxoffice_core::{
    ClientConfig, ClientError, Credential, Identity, LogoutFlow, LogoutOutcome, RequestDescriptor,
};
use browser::WindowBrowser;
use error::to_js_error;
use gloo::events::EventListener;
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use storage::WebStorage;
use tracing_subscriber::filter::LevelFilter;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init_logging(LevelFilter::INFO);
    install_page_load_hook();
}

/// Mirror the stored session once the DOM is ready
fn install_page_load_hook() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.ready_state() != "loading" {
        mirror_session();
        return;
    }
    EventListener::once(&document, "DOMContentLoaded", |_| mirror_session()).forget();
}

fn mirror_session() {
    match context::load_session() {
        Ok(Some(session)) => tracing::debug!(
            has_identity = !session.identity.is_empty(),
            "Restored stored session"
        ),
        Ok(None) => tracing::debug!("No stored session"),
        Err(e) => tracing::error!(error = %e, "Failed to restore stored session"),
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|e| to_js_error(&ClientError::parse(e.to_string())))
}

/// Override the defaults (base URL, storage keys, logout endpoint, ...)
#[wasm_bindgen]
pub fn configure(options: JsValue) -> Result<(), JsValue> {
    let config = if options.is_undefined() || options.is_null() {
        ClientConfig::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| to_js_error(&ClientError::Configuration(e.to_string())))?
    };
    context::configure(config).map_err(|e| to_js_error(&e))
}

/// Build the request from `apiCall` arguments.
///
/// The method defaults to GET and a falsy `data` (`null`, `false`, `0`,
/// `""`, ...) means no payload.
pub fn request_descriptor(
    endpoint: String,
    method: Option<String>,
    data: JsValue,
) -> Result<RequestDescriptor, ClientError> {
    let mut descriptor = RequestDescriptor::new(endpoint);
    if let Some(method) = method {
        descriptor = descriptor.method_named(&method)?;
    }
    if data.is_truthy() {
        let body: serde_json::Value = serde_wasm_bindgen::from_value(data)
            .map_err(|e| ClientError::parse(e.to_string()))?;
        descriptor = descriptor.json(body);
    }
    Ok(descriptor)
}

/// Authenticated JSON request; resolves to the parsed body
#[wasm_bindgen(js_name = apiCall)]
pub async fn api_call(
    endpoint: String,
    method: Option<String>,
    data: JsValue,
) -> Result<JsValue, JsValue> {
    let descriptor = request_descriptor(endpoint, method, data).map_err(|e| to_js_error(&e))?;

    let client = context::client().map_err(|e| to_js_error(&e))?;
    let value = client
        .request(descriptor)
        .await
        .map_err(|e| to_js_error(&e))?;
    to_js(&value)
}

#[wasm_bindgen(js_name = formatCurrency)]
pub fn format_currency(amount: f64) -> String {
    boxoffice_core::format_currency(amount)
}

#[wasm_bindgen(js_name = formatDate)]
pub fn format_date(input: &str) -> Result<String, JsValue> {
    boxoffice_core::format_date(input).map_err(|e| to_js_error(&e))
}

#[wasm_bindgen(js_name = showLoading)]
pub fn show_loading(element: &web_sys::Element) {
    dom::show_loading(element);
}

#[wasm_bindgen(js_name = showError)]
pub fn show_error(element: &web_sys::Element, message: &str) {
    dom::show_error(element, message);
}

/// Persist a fresh login and refresh the page session
#[wasm_bindgen(js_name = storeSession)]
pub fn store_session(token: &str, user: JsValue) -> Result<(), JsValue> {
    let identity = if user.is_undefined() || user.is_null() {
        Identity::default()
    } else {
        let value: serde_json::Value = serde_wasm_bindgen::from_value(user)
            .map_err(|e| to_js_error(&ClientError::parse(e.to_string())))?;
        Identity::try_from(value).map_err(|e| to_js_error(&e))?
    };

    let client = context::client().map_err(|e| to_js_error(&e))?;
    client
        .session()
        .store(&Credential::new(token), &identity)
        .map_err(|e| to_js_error(&e))?;
    context::load_session().map_err(|e| to_js_error(&e))?;
    Ok(())
}

/// Identity mirrored at page load, or `undefined` when logged out
#[wasm_bindgen(js_name = currentSession)]
pub fn current_session() -> Result<JsValue, JsValue> {
    match context::session() {
        Some(session) => to_js(&session.identity),
        None => Ok(JsValue::UNDEFINED),
    }
}

/// Confirm, clear storage, notify the server and go home.
///
/// Returns `false` when the user declines.
#[wasm_bindgen]
pub fn logout() -> Result<bool, JsValue> {
    let client = context::client().map_err(|e| to_js_error(&e))?;
    let session_storage = WebStorage::session().map_err(|e| to_js_error(&e))?;

    let outcome = LogoutFlow::new(client, session_storage, WindowBrowser).run();
    if outcome == LogoutOutcome::LoggedOut {
        context::clear_session();
    }
    Ok(outcome == LogoutOutcome::LoggedOut)
}
