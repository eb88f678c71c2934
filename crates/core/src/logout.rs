//! Confirm-and-redirect logout
//!
//! Once the user confirms, the flow always ends on the home page: storage is
//! cleared, the server is told in a detached task whose outcome is only
//! logged, and navigation happens without waiting for that task.

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::storage::KeyValueStore;
use crate::transport::HttpTransport;
use futures::future::LocalBoxFuture;
use std::rc::Rc;

/// Browser capabilities the logout flow needs
pub trait Browser {
    /// Blocking yes/no prompt
    fn confirm(&self, message: &str) -> bool;

    /// Leave the current page for `path`
    fn navigate(&self, path: &str) -> ClientResult<()>;

    /// Run `task` on the event loop without awaiting it
    fn spawn_detached(&self, task: LocalBoxFuture<'static, ()>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// User cancelled; nothing changed
    Declined,
    /// Storage cleared and navigation issued
    LoggedOut,
}

pub struct LogoutFlow<T, L, S, B> {
    api: Rc<ApiClient<T, L>>,
    session_storage: S,
    browser: B,
}

impl<T, L, S, B> LogoutFlow<T, L, S, B>
where
    T: HttpTransport + 'static,
    L: KeyValueStore + 'static,
    S: KeyValueStore,
    B: Browser,
{
    pub const fn new(api: Rc<ApiClient<T, L>>, session_storage: S, browser: B) -> Self {
        Self {
            api,
            session_storage,
            browser,
        }
    }

    pub const fn browser(&self) -> &B {
        &self.browser
    }

    pub fn run(&self) -> LogoutOutcome {
        let config = self.api.config();
        if !self.browser.confirm(&config.logout_prompt) {
            tracing::debug!("Logout declined");
            return LogoutOutcome::Declined;
        }

        if let Err(e) = self.api.session().clear() {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }
        if let Err(e) = self.session_storage.clear() {
            tracing::warn!(error = %e, "Failed to clear session storage");
        }

        let api = Rc::clone(&self.api);
        self.browser.spawn_detached(Box::pin(async move {
            if let Err(e) = api.notify_logout().await {
                tracing::info!(error = %e, "Logout endpoint call failed (non-critical)");
            }
        }));

        if let Err(e) = self.browser.navigate(&config.home_path) {
            tracing::error!(error = %e, path = %config.home_path, "Navigation after logout failed");
        }

        LogoutOutcome::LoggedOut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::storage::MemoryStore;
    use crate::transport::mock::MockTransport;
    use crate::transport::{HttpResponse, TransportError};
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct RecordingBrowser {
        answer: bool,
        prompts: RefCell<Vec<String>>,
        navigations: RefCell<Vec<String>>,
        tasks: RefCell<Vec<LocalBoxFuture<'static, ()>>>,
    }

    impl RecordingBrowser {
        fn answering(answer: bool) -> Self {
            Self {
                answer,
                ..Self::default()
            }
        }

        async fn drain_tasks(&self) {
            let tasks: Vec<_> = self.tasks.borrow_mut().drain(..).collect();
            for task in tasks {
                task.await;
            }
        }
    }

    impl Browser for &RecordingBrowser {
        fn confirm(&self, message: &str) -> bool {
            self.prompts.borrow_mut().push(message.to_string());
            self.answer
        }

        fn navigate(&self, path: &str) -> ClientResult<()> {
            self.navigations.borrow_mut().push(path.to_string());
            Ok(())
        }

        fn spawn_detached(&self, task: LocalBoxFuture<'static, ()>) {
            self.tasks.borrow_mut().push(task);
        }
    }

    fn logged_in_local() -> MemoryStore {
        MemoryStore::with_items([
            ("access_token", "tok"),
            ("user", r#"{"id": 3}"#),
            ("theme", "dark"),
        ])
    }

    #[tokio::test]
    async fn test_confirmed_logout_clears_and_navigates() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, "")));

        let local = Rc::new(logged_in_local());
        let api = Rc::new(ApiClient::new(transport, Rc::clone(&local), ClientConfig::default()));
        let session = MemoryStore::with_items([("cart", "[1]")]);
        let browser = RecordingBrowser::answering(true);

        let flow = LogoutFlow::new(api, &session, &browser);
        assert_eq!(flow.run(), LogoutOutcome::LoggedOut);

        assert_eq!(local.get_item("access_token").unwrap(), None);
        assert_eq!(local.get_item("user").unwrap(), None);
        assert_eq!(local.get_item("theme").unwrap().as_deref(), Some("dark"));
        assert!(session.is_empty());
        assert_eq!(*browser.navigations.borrow(), vec!["/".to_string()]);
        assert_eq!(
            *browser.prompts.borrow(),
            vec!["Are you sure you want to logout?".to_string()]
        );

        browser.drain_tasks().await;
    }

    #[tokio::test]
    async fn test_navigation_does_not_wait_for_server() {
        let sent = Rc::new(Cell::new(false));
        let mut transport = MockTransport::new();
        {
            let sent = Rc::clone(&sent);
            transport.expect_send().times(1).returning_st(move |_| {
                sent.set(true);
                Ok(HttpResponse::new(200, ""))
            });
        }

        let api = Rc::new(ApiClient::new(transport, logged_in_local(), ClientConfig::default()));
        let browser = RecordingBrowser::answering(true);
        let flow = LogoutFlow::new(api, MemoryStore::new(), &browser);
        flow.run();

        assert_eq!(browser.navigations.borrow().len(), 1);
        assert!(!sent.get(), "server call ran before navigation");

        browser.drain_tasks().await;
        assert!(sent.get());
    }

    #[tokio::test]
    async fn test_server_failure_is_swallowed() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Err(TransportError::new("offline")));

        let local = Rc::new(logged_in_local());
        let api = Rc::new(ApiClient::new(transport, Rc::clone(&local), ClientConfig::default()));
        let browser = RecordingBrowser::answering(true);
        let flow = LogoutFlow::new(api, MemoryStore::new(), &browser);

        assert_eq!(flow.run(), LogoutOutcome::LoggedOut);
        browser.drain_tasks().await;

        assert_eq!(local.get_item("access_token").unwrap(), None);
        assert_eq!(*browser.navigations.borrow(), vec!["/".to_string()]);
    }

    #[tokio::test]
    async fn test_declined_logout_changes_nothing() {
        let mut transport = MockTransport::new();
        transport.expect_send().never();

        let local = Rc::new(logged_in_local());
        let before = local.snapshot();
        let api = Rc::new(ApiClient::new(transport, Rc::clone(&local), ClientConfig::default()));
        let session = MemoryStore::with_items([("cart", "[1]")]);
        let browser = RecordingBrowser::answering(false);

        let flow = LogoutFlow::new(api, &session, &browser);
        assert_eq!(flow.run(), LogoutOutcome::Declined);

        assert_eq!(local.snapshot(), before);
        assert_eq!(session.len(), 1);
        assert!(browser.navigations.borrow().is_empty());
        assert!(browser.tasks.borrow().is_empty());
    }

    #[test]
    fn test_custom_home_path() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Ok(HttpResponse::new(200, "")));

        let config = ClientConfig {
            home_path: "/events".into(),
            ..ClientConfig::default()
        };
        let api = Rc::new(ApiClient::new(transport, MemoryStore::new(), config));
        let browser = RecordingBrowser::answering(true);
        LogoutFlow::new(api, MemoryStore::new(), &browser).run();

        assert_eq!(*browser.navigations.borrow(), vec!["/events".to_string()]);
    }
}
