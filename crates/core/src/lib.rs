//! Boxoffice browser session client
//!
//! Platform-independent pieces of the site's client glue: the stored
//! credential and identity, the authenticated JSON request helper, en-US
//! formatters and the logout flow. Browser bindings live in `boxoffice-web`.

pub mod api;
pub mod config;
pub mod error;
pub mod feedback;
pub mod format;
pub mod logout;
pub mod session;
pub mod storage;
pub mod transport;

pub use api::{ApiClient, RequestDescriptor};
pub use config::{AuthConfig, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use format::{format_currency, format_date};
pub use logout::{Browser, LogoutFlow, LogoutOutcome};
pub use session::{Credential, Identity, SessionContext, SessionStore};
pub use storage::{KeyValueStore, MemoryStore};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
