//! The real window as a [`Browser`]

use crate::error::js_message;
use boxoffice_core::{Browser, ClientError, ClientResult};
use futures::future::LocalBoxFuture;

#[derive(Debug, Clone, Copy, Default)]
pub struct WindowBrowser;

impl Browser for WindowBrowser {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn navigate(&self, path: &str) -> ClientResult<()> {
        let window =
            web_sys::window().ok_or_else(|| ClientError::Configuration("no window".into()))?;
        window.location().set_href(path).map_err(|e| {
            ClientError::Configuration(format!("cannot navigate to {path}: {}", js_message(&e)))
        })
    }

    fn spawn_detached(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
