//! In-memory user store
//!
//! Backs the `memory` store provider and the test suites. Email uniqueness is
//! checked under the write lock.

use async_trait::async_trait;
use chrono::Utc;
use jobboard_common::{Page, PageRequest, RepositoryError};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::UserStore;
use crate::domain::entities::{NewUser, User};

#[derive(Default)]
struct UserTable {
    next_id: i64,
    rows: BTreeMap<i64, User>,
}

impl UserTable {
    fn email_taken(&self, email: &str, except_id: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|u| u.email == email && Some(u.id) != except_id)
    }
}

#[derive(Default)]
pub struct InMemoryUserStore {
    table: RwLock<UserTable>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut table = self.table.write().await;
        if table.email_taken(&user.email, None) {
            return Err(RepositoryError::AlreadyExists);
        }

        table.next_id += 1;
        let now = Utc::now();
        let stored = User {
            id: table.next_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&user.id) {
            return Err(RepositoryError::NotFound);
        }
        if table.email_taken(&user.email, Some(user.id)) {
            return Err(RepositoryError::AlreadyExists);
        }

        let mut stored = user.clone();
        stored.updated_at = Utc::now();
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, RepositoryError> {
        let table = self.table.read().await;
        let content = table
            .rows
            .values()
            .skip(page.offset() as usize)
            .take(page.size() as usize)
            .cloned()
            .collect();

        Ok(Page::new(content, page, table.rows.len() as i64))
    }
}
