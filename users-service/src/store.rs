//! In-memory user store
//!
//! An ordered, append-only list of users shared by every handler. The store is
//! a cheap handle: clones point at the same list.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::User;

/// Shared ordered collection of users
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the two sample users, timestamped relative to `now`
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self::from_users(User::seed(now))
    }

    /// Store holding `users` in the given order
    pub fn from_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// Snapshot of every user in insertion order
    pub async fn list(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    /// First user whose id equals `id` exactly
    pub async fn get(&self, id: &str) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|user| user.id == id)
            .cloned()
    }

    /// Append a user. Existing ids are not checked.
    pub async fn append(&self, user: User) {
        self.users.write().await.push(user);
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}
