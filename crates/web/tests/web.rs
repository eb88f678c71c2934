//! Browser tests, run with `wasm-pack test --headless --firefox crates/web`

#![cfg(target_arch = "wasm32")]

use boxoffice_core::{ClientConfig, ClientError, KeyValueStore, SessionContext, SessionStore};
use boxoffice_web::error::to_js_error;
use boxoffice_web::storage::WebStorage;
use boxoffice_web::{
    api_call, configure, current_session, dom, format_currency, format_date, request_descriptor,
    store_session,
};
use http::Method;
use serde_json::json;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn fresh_div() -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    document.create_element("div").unwrap()
}

#[wasm_bindgen_test]
fn local_storage_roundtrip() {
    let storage = WebStorage::local().unwrap();
    storage.set_item("boxoffice_test", "1").unwrap();
    assert_eq!(storage.get_item("boxoffice_test").unwrap().as_deref(), Some("1"));
    storage.remove_item("boxoffice_test").unwrap();
    assert_eq!(storage.get_item("boxoffice_test").unwrap(), None);
}

#[wasm_bindgen_test]
fn session_storage_clear() {
    let storage = WebStorage::session().unwrap();
    storage.set_item("cart", "[]").unwrap();
    storage.clear().unwrap();
    assert_eq!(storage.get_item("cart").unwrap(), None);
}

#[wasm_bindgen_test]
fn session_context_from_local_storage() {
    let storage = WebStorage::local().unwrap();
    storage.set_item("access_token", "browser-token").unwrap();
    storage.set_item("user", r#"{"name": "Ana"}"#).unwrap();

    let store = SessionStore::new(storage.clone(), &ClientConfig::default());
    let context = SessionContext::load(&store).unwrap().unwrap();
    assert_eq!(context.credential.as_str(), "browser-token");
    assert!(!context.identity.is_empty());

    store.clear().unwrap();
    assert_eq!(SessionContext::load(&store).unwrap(), None);
}

#[wasm_bindgen_test]
fn loading_placeholder() {
    let div = fresh_div();
    div.set_inner_html("<p>old</p>");
    dom::show_loading(&div);
    assert_eq!(div.inner_html(), r#"<div class="spinner"></div>"#);
}

#[wasm_bindgen_test]
fn error_banner() {
    let div = fresh_div();
    dom::show_error(&div, "Payment declined");
    let banner = div.first_element_child().unwrap();
    assert_eq!(banner.class_name(), "alert alert-error");
    assert_eq!(banner.text_content().as_deref(), Some("Payment declined"));
}

#[wasm_bindgen_test]
fn formatting_exports() {
    assert_eq!(format_currency(1234.5), "$1,234.50");
    assert!(format_date("2024-01-15T10:30:00Z").unwrap().contains("2024"));

    let err = format_date("garbage").unwrap_err();
    let err: js_sys::Error = err.dyn_into().unwrap();
    assert_eq!(String::from(err.name()), "ParseError");
}

fn js_object(source: &str) -> JsValue {
    js_sys::JSON::parse(source).unwrap()
}

fn error_name(value: &JsValue) -> String {
    let err: &js_sys::Error = value.dyn_ref().unwrap();
    String::from(err.name())
}

#[wasm_bindgen_test]
fn request_error_carries_name_and_status() {
    let value = to_js_error(&ClientError::request(409, "Seat taken"));
    let err: &js_sys::Error = value.dyn_ref().unwrap();

    assert_eq!(String::from(err.name()), "RequestError");
    assert_eq!(String::from(err.message()), "Seat taken");
    let status = js_sys::Reflect::get(&value, &JsValue::from_str("status")).unwrap();
    assert_eq!(status.as_f64(), Some(409.0));
}

#[wasm_bindgen_test]
fn network_error_has_no_status() {
    let value = to_js_error(&ClientError::network("offline"));
    assert_eq!(error_name(&value), "NetworkError");
    let status = js_sys::Reflect::get(&value, &JsValue::from_str("status")).unwrap();
    assert!(status.is_undefined());
}

#[wasm_bindgen_test]
fn method_defaults_to_get() {
    let descriptor = request_descriptor("/api/events".into(), None, JsValue::UNDEFINED).unwrap();
    assert_eq!(descriptor.method, Method::GET);
    assert_eq!(descriptor.body, None);
}

#[wasm_bindgen_test]
fn falsy_data_sends_no_payload() {
    for data in [
        JsValue::NULL,
        JsValue::FALSE,
        JsValue::from(0),
        JsValue::from_str(""),
    ] {
        let descriptor =
            request_descriptor("/api/orders".into(), Some("post".into()), data).unwrap();
        assert_eq!(descriptor.method, Method::POST);
        assert_eq!(descriptor.body, None);
    }
}

#[wasm_bindgen_test]
fn truthy_data_becomes_json_payload() {
    let descriptor = request_descriptor(
        "/api/orders".into(),
        Some("POST".into()),
        js_object(r#"{"event_id": 4, "quantity": 2}"#),
    )
    .unwrap();
    assert_eq!(descriptor.body, Some(json!({"event_id": 4, "quantity": 2})));
}

#[wasm_bindgen_test]
fn invalid_method_is_rejected() {
    let err = request_descriptor("/x".into(), Some("BAD VERB".into()), JsValue::NULL).unwrap_err();
    assert!(matches!(err, ClientError::Configuration(_)));
}

#[wasm_bindgen_test]
fn stored_session_is_visible_to_current_session() {
    configure(JsValue::UNDEFINED).unwrap();
    store_session("fresh-token", js_object(r#"{"name": "Ana", "id": 7}"#)).unwrap();

    let identity = current_session().unwrap();
    let name = js_sys::Reflect::get(&identity, &JsValue::from_str("name")).unwrap();
    assert_eq!(name.as_string().as_deref(), Some("Ana"));

    let storage = WebStorage::local().unwrap();
    assert_eq!(storage.get_item("access_token").unwrap().as_deref(), Some("fresh-token"));

    SessionStore::new(storage, &ClientConfig::default()).clear().unwrap();
}

#[wasm_bindgen_test]
fn store_session_rejects_non_object_identity() {
    let err = store_session("tok", js_object("[1, 2]")).unwrap_err();
    assert_eq!(error_name(&err), "ParseError");
}

#[wasm_bindgen_test]
fn configure_rejects_bad_base_url() {
    let err = configure(js_object(r#"{"baseUrl": "ftp://tickets.test"}"#)).unwrap_err();
    assert_eq!(error_name(&err), "ConfigurationError");
    configure(JsValue::UNDEFINED).unwrap();
}

#[wasm_bindgen_test]
async fn api_call_to_closed_port_is_network_error() {
    configure(js_object(r#"{"baseUrl": "http://127.0.0.1:9"}"#)).unwrap();
    let err = api_call("/api/events".into(), None, JsValue::NULL)
        .await
        .unwrap_err();
    configure(JsValue::UNDEFINED).unwrap();

    assert_eq!(error_name(&err), "NetworkError");
}
