//! Typed JSON access to the key-value port.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{trace, warn};

use crate::domain::error::DomainError;
use crate::domain::ports::KeyValueStore;

/// Fixed keys of the persisted layout.
pub mod keys {
    pub const CARS: &str = "cars";
    pub const USERS: &str = "users";
    pub const CURRENT_USER: &str = "currentUser";
    pub const COMPARE_LIST: &str = "compareList";
    pub const FAVORITES: &str = "favorites";
    pub const NEWSLETTER_SUBSCRIBERS: &str = "newsletter_subscribers";
    pub const CONTACT_SUBMISSIONS: &str = "contact_submissions";
    pub const RECENT_SEARCHES: &str = "recentSearches";
}

/// JSON codec over a `KeyValueStore`.
///
/// A stored value that does not parse as `T` is reported with a warning and
/// read as absent, for every key alike. Backend failures are errors.
#[derive(Clone)]
pub struct StateStore {
    backend: Arc<dyn KeyValueStore>,
}

impl StateStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// True when something is stored under `key`, parseable or not.
    pub fn contains(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.raw(key)?.is_some())
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DomainError> {
        let Some(raw) = self.raw(key)? else {
            return Ok(None);
        };
        match serde_json::from_str::<T>(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "discarding unreadable persisted state");
                Ok(None)
            }
        }
    }

    pub fn load_or_default<T: DeserializeOwned + Default>(
        &self,
        key: &str,
    ) -> Result<T, DomainError> {
        Ok(self.load(key)?.unwrap_or_default())
    }

    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), DomainError> {
        let raw = serde_json::to_string(value)
            .map_err(|e| DomainError::storage(format!("encode {}: {}", key, e)))?;
        trace!(key, bytes = raw.len(), "saving state");
        self.backend
            .set(key, &raw)
            .map_err(|e| DomainError::storage(format!("write {}: {:#}", key, e)))
    }

    pub fn clear(&self, key: &str) -> Result<(), DomainError> {
        self.backend
            .remove(key)
            .map_err(|e| DomainError::storage(format!("remove {}: {:#}", key, e)))
    }

    fn raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.backend
            .get(key)
            .map_err(|e| DomainError::storage(format!("read {}: {:#}", key, e)))
    }
}
