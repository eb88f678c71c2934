//! Stored credential and identity, and the page-load session context

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque bearer token
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value of the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Cached user profile, kept as an unvalidated JSON object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(serde_json::Map<String, serde_json::Value>);

impl Identity {
    pub fn new(fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.0.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> serde_json::Map<String, serde_json::Value> {
        self.0
    }
}

impl TryFrom<serde_json::Value> for Identity {
    type Error = ClientError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Object(fields) => Ok(Self(fields)),
            other => Err(ClientError::parse(format!(
                "identity must be a JSON object, got {other}"
            ))),
        }
    }
}

/// Reads and writes the credential/identity pair in persistent storage
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
    token_key: String,
    identity_key: String,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S, config: &ClientConfig) -> Self {
        Self {
            storage,
            token_key: config.token_key.clone(),
            identity_key: config.identity_key.clone(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Stored credential; an empty string counts as absent
    pub fn credential(&self) -> ClientResult<Option<Credential>> {
        Ok(self
            .storage
            .get_item(&self.token_key)?
            .filter(|token| !token.is_empty())
            .map(Credential))
    }

    /// Stored identity, or an empty record when nothing is stored.
    ///
    /// Malformed JSON is reported as [`ClientError::Parse`].
    pub fn identity(&self) -> ClientResult<Identity> {
        match self.storage.get_item(&self.identity_key)? {
            None => Ok(Identity::default()),
            Some(raw) if raw.is_empty() => Ok(Identity::default()),
            Some(raw) => {
                let value: serde_json::Value = serde_json::from_str(&raw)?;
                Identity::try_from(value)
            }
        }
    }

    /// Persist both halves of a fresh session
    pub fn store(&self, credential: &Credential, identity: &Identity) -> ClientResult<()> {
        self.storage.set_item(&self.token_key, credential.as_str())?;
        self.storage
            .set_item(&self.identity_key, &serde_json::to_string(identity)?)?;
        Ok(())
    }

    /// Remove both keys.
    ///
    /// Both removals are attempted; the first failure is returned.
    pub fn clear(&self) -> ClientResult<()> {
        let token = self.storage.remove_item(&self.token_key);
        let identity = self.storage.remove_item(&self.identity_key);
        token.and(identity)?;
        tracing::debug!("Cleared stored credential and identity");
        Ok(())
    }
}

/// Session state handed to renderers at page load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub credential: Credential,
    pub identity: Identity,
}

impl SessionContext {
    /// Mirror the stored session.
    ///
    /// The identity is parsed on every load, token or not, so a malformed
    /// record always surfaces. Returns `None` without a stored token; the
    /// identity may be empty.
    pub fn load<S: KeyValueStore>(store: &SessionStore<S>) -> ClientResult<Option<Self>> {
        let identity = store.identity().inspect_err(|e| {
            tracing::warn!(error = %e, "Stored identity is malformed");
        })?;
        let Some(credential) = store.credential()? else {
            return Ok(None);
        };
        Ok(Some(Self {
            credential,
            identity,
        }))
    }
}
