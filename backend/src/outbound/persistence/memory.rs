//! In-memory user record store.
//!
//! The table lives behind an `RwLock`; each port call locks once, so calls
//! are individually consistent but find-then-write sequences across calls
//! are not atomic (see the port contract).

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserStoreError};
use crate::domain::{User, UserId};

#[derive(Debug, Default)]
struct UserTable {
    rows: BTreeMap<i64, User>,
    last_id: i64,
}

/// Record store keeping user rows in process memory, ordered by id.
///
/// Ids come from a monotonically increasing counter and are never reissued,
/// so a deleted record cannot reappear under its old id.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    table: RwLock<UserTable>,
}

impl MemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, UserTable>, UserStoreError> {
        self.table
            .read()
            .map_err(|_| UserStoreError::connection("user table lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, UserTable>, UserStoreError> {
        self.table
            .write()
            .map_err(|_| UserStoreError::connection("user table lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, UserStoreError> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        Ok(self.read()?.rows.get(&id.value()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        Ok(self
            .read()?
            .rows
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn save(&self, user: &User) -> Result<User, UserStoreError> {
        let mut table = self.write()?;
        let stored = match user.id() {
            Some(id) => {
                table.last_id = table.last_id.max(id.value());
                user.clone()
            }
            None => {
                table.last_id += 1;
                user.clone().with_id(UserId::new(table.last_id))
            }
        };
        let id = stored
            .id()
            .ok_or_else(|| UserStoreError::query("record missing id after assignment"))?;
        table.rows.insert(id.value(), stored.clone());
        Ok(stored)
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), UserStoreError> {
        self.write()?.rows.remove(&id.value());
        Ok(())
    }
}
