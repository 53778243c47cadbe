//! Application state management

use chrono::Utc;
use std::sync::Arc;

use crate::{config::Config, ids::UserIdGenerator, store::UserStore};

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    config: Arc<Config>,
    users: UserStore,
    user_ids: Arc<UserIdGenerator>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AppState {
    /// State with the given configuration and a freshly seeded store
    pub fn new(config: Config) -> Self {
        Self::builder().config(config).build()
    }

    /// Create a new builder for AppState
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the user store
    pub fn users(&self) -> &UserStore {
        &self.users
    }

    /// Get the user id generator
    pub fn user_ids(&self) -> &UserIdGenerator {
        &self.user_ids
    }
}

/// Builder for AppState
#[derive(Debug, Default)]
pub struct AppStateBuilder {
    config: Option<Config>,
    users: Option<UserStore>,
}

impl AppStateBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use an existing store instead of the seeded default
    pub fn users(mut self, users: UserStore) -> Self {
        self.users = Some(users);
        self
    }

    /// Build the AppState
    pub fn build(self) -> AppState {
        let users = self.users.unwrap_or_else(|| {
            tracing::debug!("Seeding user store with sample records");
            UserStore::seeded(Utc::now())
        });

        AppState {
            config: Arc::new(self.config.unwrap_or_default()),
            users,
            user_ids: Arc::new(UserIdGenerator::new()),
        }
    }
}
