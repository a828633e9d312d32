use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::state::{keys, StateStore};

/// Ordered set of favorite car ids under `favorites`.
#[derive(Clone)]
pub struct FavoritesTracker {
    state: StateStore,
}

impl FavoritesTracker {
    pub fn new(state: StateStore) -> Self {
        Self { state }
    }

    /// Flip membership of `id`; returns whether it is a favorite afterwards.
    pub fn toggle(&self, id: &str) -> Result<bool, DomainError> {
        let mut ids = self.list()?;
        let now_favorite = match ids.iter().position(|f| f == id) {
            Some(pos) => {
                ids.remove(pos);
                false
            }
            None => {
                ids.push(id.to_string());
                true
            }
        };
        self.state.save(keys::FAVORITES, &ids)?;
        debug!(car_id = id, now_favorite, "toggled favorite");
        Ok(now_favorite)
    }

    pub fn is_favorite(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.list()?.iter().any(|f| f == id))
    }

    pub fn list(&self) -> Result<Vec<String>, DomainError> {
        self.state.load_or_default(keys::FAVORITES)
    }

    pub fn clear(&self) -> Result<(), DomainError> {
        self.state.save(keys::FAVORITES, &Vec::<String>::new())
    }
}
