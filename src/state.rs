use crate::config::AppConfig;
use crate::users::repo::{InMemoryUserRepository, UserRepository};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init(config: AppConfig) -> Self {
        let users = Arc::new(InMemoryUserRepository::new()) as Arc<dyn UserRepository>;
        Self::from_parts(users, Arc::new(config))
    }

    pub fn from_parts(users: Arc<dyn UserRepository>, config: Arc<AppConfig>) -> Self {
        Self { users, config }
    }

    /// Empty repository, default config, nothing seeded.
    #[cfg(test)]
    pub fn fake() -> Self {
        Self::init(AppConfig {
            seed_sample_users: false,
            ..AppConfig::default()
        })
    }
}
