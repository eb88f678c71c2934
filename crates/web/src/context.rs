//! Per-page runtime state: the configured client and the mirrored session

use crate::storage::WebStorage;
use boxoffice_core::{
    ApiClient, ClientConfig, ClientResult, ReqwestTransport, SessionContext, SessionStore,
};
use std::cell::RefCell;
use std::rc::Rc;

pub type PageClient = ApiClient<ReqwestTransport, WebStorage>;

thread_local! {
    static CONFIG: RefCell<Option<ClientConfig>> = const { RefCell::new(None) };
    static CLIENT: RefCell<Option<Rc<PageClient>>> = const { RefCell::new(None) };
    static SESSION: RefCell<Option<SessionContext>> = const { RefCell::new(None) };
}

/// Page origin, used when no base URL is configured
fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Install a configuration, replacing the current client
pub fn configure(config: ClientConfig) -> ClientResult<()> {
    let mut config = config;
    if config.base_url.is_empty() {
        config.base_url = origin();
    }
    let config = config.validate()?;
    tracing::debug!(base_url = %config.base_url, "Session client configured");

    CONFIG.with(|c| *c.borrow_mut() = Some(config));
    CLIENT.with(|c| *c.borrow_mut() = None);
    Ok(())
}

pub fn config() -> ClientResult<ClientConfig> {
    if let Some(config) = CONFIG.with(|c| c.borrow().clone()) {
        return Ok(config);
    }
    configure(ClientConfig::default())?;
    Ok(CONFIG.with(|c| c.borrow().clone()).unwrap_or_default())
}

/// Shared client for this page, built on first use
pub fn client() -> ClientResult<Rc<PageClient>> {
    if let Some(client) = CLIENT.with(|c| c.borrow().clone()) {
        return Ok(client);
    }
    let client = Rc::new(ApiClient::new(
        ReqwestTransport::new(),
        WebStorage::local()?,
        config()?,
    ));
    CLIENT.with(|c| *c.borrow_mut() = Some(Rc::clone(&client)));
    Ok(client)
}

/// Read the stored session into the page context
pub fn load_session() -> ClientResult<Option<SessionContext>> {
    let store = SessionStore::new(WebStorage::local()?, &config()?);
    let context = SessionContext::load(&store)?;
    SESSION.with(|s| *s.borrow_mut() = context.clone());
    Ok(context)
}

/// Session mirrored at page load, if any
pub fn session() -> Option<SessionContext> {
    SESSION.with(|s| s.borrow().clone())
}

pub fn clear_session() {
    SESSION.with(|s| *s.borrow_mut() = None);
}
