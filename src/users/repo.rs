use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::users::repo_types::{User, UserFields};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoError {
    #[error("user {0} not found")]
    NotFound(Uuid),

    #[error("email '{0}' already in use")]
    DuplicateEmail(String),

    #[error("user id {0} already present")]
    DuplicateId(Uuid),
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage seam for user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> Vec<User>;

    async fn get_by_id(&self, id: Uuid) -> Option<User>;

    /// Whether some record other than `except` already uses `email`.
    async fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool;

    /// Append a record. Fails if its email or id is already present.
    async fn insert(&self, user: User) -> RepoResult<User>;

    /// Overwrite name, email and hash of an existing record in place.
    async fn update(&self, id: Uuid, fields: UserFields) -> RepoResult<User>;

    /// Remove a record. Returns false if it was absent.
    async fn delete(&self, id: Uuid) -> bool;
}

#[derive(Debug, Default)]
struct Store {
    by_id: HashMap<Uuid, User>,
    order: Vec<Uuid>,
}

impl Store {
    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.by_id
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

/// Process-wide collection; every access goes through one lock.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Vec<User> {
        let store = self.store.lock().await;
        store
            .order
            .iter()
            .filter_map(|id| store.by_id.get(id).cloned())
            .collect()
    }

    async fn get_by_id(&self, id: Uuid) -> Option<User> {
        self.store.lock().await.by_id.get(&id).cloned()
    }

    async fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.store.lock().await.email_taken(email, except)
    }

    async fn insert(&self, user: User) -> RepoResult<User> {
        let mut store = self.store.lock().await;

        if store.by_id.contains_key(&user.id) {
            return Err(RepoError::DuplicateId(user.id));
        }
        if store.email_taken(&user.email, None) {
            return Err(RepoError::DuplicateEmail(user.email));
        }

        store.order.push(user.id);
        store.by_id.insert(user.id, user.clone());

        info!(user_id = %user.id, email = %user.email, "user inserted");
        Ok(user)
    }

    async fn update(&self, id: Uuid, fields: UserFields) -> RepoResult<User> {
        let mut store = self.store.lock().await;

        if !store.by_id.contains_key(&id) {
            return Err(RepoError::NotFound(id));
        }
        if store.email_taken(&fields.email, Some(id)) {
            return Err(RepoError::DuplicateEmail(fields.email));
        }

        let user = store.by_id.get_mut(&id).ok_or(RepoError::NotFound(id))?;
        user.apply(fields);

        info!(user_id = %id, "user updated");
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> bool {
        let mut store = self.store.lock().await;

        if store.by_id.remove(&id).is_none() {
            return false;
        }
        store.order.retain(|x| *x != id);

        info!(user_id = %id, "user deleted");
        true
    }
}
