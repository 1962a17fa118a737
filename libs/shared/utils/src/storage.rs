use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use shared_models::auth::{AUTH_TOKEN_KEY, TOKEN_TYPE_KEY};
use shared_models::{AppError, AuthCredentials};

/// Client-side key/value storage holding the session written by the login flow.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads `authToken` and `tokenType`; either missing or blank is `Unauthorized`.
pub fn read_credentials(store: &dyn CredentialStore) -> Result<AuthCredentials, AppError> {
    let token = store.get(AUTH_TOKEN_KEY).filter(|t| !t.trim().is_empty());
    let token_type = store.get(TOKEN_TYPE_KEY).filter(|t| !t.trim().is_empty());

    match (token, token_type) {
        (Some(token), Some(token_type)) => Ok(AuthCredentials::new(token, token_type)),
        _ => {
            debug!("No stored credentials found");
            Err(AppError::Unauthorized("Unauthorized".to_string()))
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: &AuthCredentials) -> Self {
        let store = Self::new();
        store.set(AUTH_TOKEN_KEY, &credentials.token);
        store.set(TOKEN_TYPE_KEY, &credentials.token_type);
        store
    }

    pub fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    pub fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.write() {
            values.remove(key);
        }
    }
}

impl CredentialStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }
}
