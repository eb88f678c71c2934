//! Authenticated request helper
//!
//! Every call is a single round trip: headers are built from the stored
//! credential, the body is parsed as JSON whatever the status, and failures
//! are logged before being handed back to the caller. There is no timeout and
//! no retry.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;
use crate::storage::KeyValueStore;
use crate::transport::{CredentialsMode, HttpRequest, HttpTransport};
use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use http::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// One call to make: endpoint, verb and optional JSON payload
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub endpoint: String,
    pub method: Method,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    /// GET request, the default verb
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: Method::GET,
            body: None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint).method(Method::POST)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint).method(Method::PUT)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint).method(Method::DELETE)
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the verb from its name, case-insensitively
    pub fn method_named(self, name: &str) -> ClientResult<Self> {
        let method = Method::from_bytes(name.trim().to_ascii_uppercase().as_bytes())
            .map_err(|_| ClientError::Configuration(format!("invalid HTTP method {name:?}")))?;
        Ok(self.method(method))
    }

    /// Attach a JSON payload; ignored for GET
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Issues authenticated JSON requests
pub struct ApiClient<T, S> {
    transport: T,
    session: SessionStore<S>,
    config: ClientConfig,
}

impl<T, S> ApiClient<T, S>
where
    T: HttpTransport,
    S: KeyValueStore,
{
    pub fn new(transport: T, storage: S, config: ClientConfig) -> Self {
        let session = SessionStore::new(storage, &config);
        Self {
            transport,
            session,
            config,
        }
    }

    pub const fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Send the request and return the parsed JSON body.
    ///
    /// # Errors
    ///
    /// [`ClientError::Network`] when no response arrives,
    /// [`ClientError::Request`] on a non-success status and
    /// [`ClientError::Parse`] when the body is not JSON.
    pub async fn request(&self, descriptor: RequestDescriptor) -> ClientResult<Value> {
        let endpoint = descriptor.endpoint.clone();
        let method = descriptor.method.clone();

        self.request_inner(descriptor).await.inspect_err(|error| {
            tracing::error!(
                %endpoint,
                %method,
                kind = error.kind(),
                %error,
                "API call error"
            );
        })
    }

    /// Like [`Self::request`], deserializing the result into `R`
    pub async fn request_as<R: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> ClientResult<R> {
        let endpoint = descriptor.endpoint.clone();
        let value = self.request(descriptor).await?;
        serde_json::from_value(value).map_err(|e| {
            tracing::error!(%endpoint, error = %e, "API response has unexpected shape");
            ClientError::parse(e.to_string())
        })
    }

    async fn request_inner(&self, descriptor: RequestDescriptor) -> ClientResult<Value> {
        let request = self.build_request(descriptor)?;
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| ClientError::network(e.0))?;

        let body = parse_body(&response.body)?;
        if !response.is_success() {
            return Err(ClientError::from_response_body(response.status, &body));
        }

        tracing::debug!(status = response.status, "API call succeeded");
        Ok(body)
    }

    fn build_request(&self, descriptor: RequestDescriptor) -> ClientResult<HttpRequest> {
        let mut request = HttpRequest::new(
            descriptor.method,
            self.config.resolve(&descriptor.endpoint),
        );
        request
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(credential) = self.session.credential()? {
            let value = HeaderValue::from_str(&credential.bearer())
                .map_err(|e| ClientError::Configuration(format!("unusable token: {e}")))?;
            request.headers.insert(AUTHORIZATION, value);
        }

        if let Some(body) = descriptor.body
            && request.method != Method::GET
        {
            request.body = Some(serde_json::to_string(&body)?);
        }

        Ok(request)
    }

    /// Best-effort `GET` to the logout endpoint, sent with same-origin
    /// cookies and no bearer header. The response body is ignored.
    pub async fn notify_logout(&self) -> ClientResult<()> {
        let mut request = HttpRequest::new(
            Method::GET,
            self.config.resolve(&self.config.logout_endpoint),
        );
        request.credentials = CredentialsMode::SameOrigin;

        self.transport
            .send(request)
            .await
            .map_err(|e| ClientError::network(e.0))?;
        Ok(())
    }
}

/// Empty bodies (e.g. 204) parse as `null`
fn parse_body(raw: &str) -> ClientResult<Value> {
    if raw.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(raw).map_err(ClientError::from)
}
