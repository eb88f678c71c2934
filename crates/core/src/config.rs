//! Client configuration

use crate::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};

/// Authentication constants shared by every page
pub struct AuthConfig;

impl AuthConfig {
    /// Local storage key holding the bearer token
    pub const TOKEN_KEY: &'static str = "access_token";

    /// Local storage key holding the serialized identity
    pub const IDENTITY_KEY: &'static str = "user";

    /// Server-side logout endpoint
    pub const LOGOUT_ENDPOINT: &'static str = "/logout";

    /// Where the browser lands after logout
    pub const HOME_PATH: &'static str = "/";

    /// Confirmation shown before logging out
    pub const LOGOUT_PROMPT: &'static str = "Are you sure you want to logout?";
}

/// Runtime configuration for the session client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Prefix for relative endpoints; empty means same origin
    pub base_url: String,
    pub token_key: String,
    pub identity_key: String,
    pub logout_endpoint: String,
    pub home_path: String,
    pub logout_prompt: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token_key: AuthConfig::TOKEN_KEY.to_string(),
            identity_key: AuthConfig::IDENTITY_KEY.to_string(),
            logout_endpoint: AuthConfig::LOGOUT_ENDPOINT.to_string(),
            home_path: AuthConfig::HOME_PATH.to_string(),
            logout_prompt: AuthConfig::LOGOUT_PROMPT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Default configuration rooted at `base_url`
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Check the configuration and normalize the base URL
    pub fn validate(mut self) -> ClientResult<Self> {
        let base_url = self.base_url.trim().trim_end_matches('/').to_string();
        if !base_url.is_empty()
            && !base_url.starts_with("http://")
            && !base_url.starts_with("https://")
        {
            return Err(ClientError::Configuration(format!(
                "base_url must be http(s), got {base_url}"
            )));
        }
        if self.token_key.is_empty() || self.identity_key.is_empty() {
            return Err(ClientError::Configuration(
                "storage keys must not be empty".into(),
            ));
        }
        if self.token_key == self.identity_key {
            return Err(ClientError::Configuration(
                "token and identity keys must differ".into(),
            ));
        }
        self.base_url = base_url;
        Ok(self)
    }

    /// Resolve an endpoint against the base URL.
    ///
    /// Absolute URLs pass through untouched.
    pub fn resolve(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        if endpoint.starts_with('/') {
            format!("{}{endpoint}", self.base_url)
        } else if self.base_url.is_empty() {
            endpoint.to_string()
        } else {
            format!("{}/{endpoint}", self.base_url)
        }
    }
}
