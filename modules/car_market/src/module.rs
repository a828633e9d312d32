use std::sync::Arc;

use tracing::{debug, info};

use crate::config::CarMarketConfig;
use crate::domain::auth::AuthService;
use crate::domain::cars::CarRepository;
use crate::domain::compare::CompareEngine;
use crate::domain::error::DomainError;
use crate::domain::favorites::FavoritesTracker;
use crate::domain::outreach::OutreachService;
use crate::domain::ports::KeyValueStore;
use crate::domain::state::StateStore;

/// The car marketplace: every service wired over one key-value backend.
///
/// Services are cheap clones sharing the backend handle.
#[derive(Clone)]
pub struct CarMarket {
    config: CarMarketConfig,
    cars: CarRepository,
    auth: AuthService,
    compare: CompareEngine,
    favorites: FavoritesTracker,
    outreach: OutreachService,
}

impl CarMarket {
    pub fn new(backend: Arc<dyn KeyValueStore>, config: CarMarketConfig) -> Self {
        debug!(
            "Wiring car_market: compare_capacity={}, recent_searches_limit={}",
            config.compare_capacity, config.recent_searches_limit
        );
        let state = StateStore::new(backend);
        Self {
            cars: CarRepository::new(state.clone()),
            auth: AuthService::new(state.clone()),
            compare: CompareEngine::new(state.clone(), config.compare_capacity),
            favorites: FavoritesTracker::new(state.clone()),
            outreach: OutreachService::new(state, config.recent_searches_limit),
            config,
        }
    }

    /// Seed demo cars and accounts into an empty store, unless disabled.
    pub fn initialize(&self) -> Result<(), DomainError> {
        if !self.config.seed_demo_data {
            debug!("demo data seeding disabled");
            return Ok(());
        }
        let seeded_cars = self.cars.initialize()?;
        let seeded_users = self.auth.initialize()?;
        info!(seeded_cars, seeded_users, "car_market initialized");
        Ok(())
    }

    pub fn config(&self) -> &CarMarketConfig {
        &self.config
    }

    pub fn cars(&self) -> &CarRepository {
        &self.cars
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn compare(&self) -> &CompareEngine {
        &self.compare
    }

    pub fn favorites(&self) -> &FavoritesTracker {
        &self.favorites
    }

    pub fn outreach(&self) -> &OutreachService {
        &self.outreach
    }
}
