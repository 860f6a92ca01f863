use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::{RabbitStore, Store, StoreError, UserStore};
use crate::models::{NewUser, ProfileUpdate, Rabbit, RabbitInput, User};

/// In-process backend with the same contract as [`super::PgStore`]
///
/// Identifiers start at 1 and are never reused, like a `SERIAL` column.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    rabbits: BTreeMap<i32, Rabbit>,
    users: BTreeMap<i32, User>,
    last_rabbit_id: i32,
    last_user_id: i32,
}

impl Tables {
    fn username_taken(&self, username: &str, except: Option<i32>) -> bool {
        self.users
            .values()
            .any(|u| u.username == username && Some(u.user_id) != except)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RabbitStore for MemoryStore {
    async fn list_rabbits(&self) -> Result<Vec<Rabbit>, StoreError> {
        Ok(self.read().rabbits.values().cloned().collect())
    }

    async fn get_rabbit(&self, rabbit_id: i32) -> Result<Option<Rabbit>, StoreError> {
        Ok(self.read().rabbits.get(&rabbit_id).cloned())
    }

    async fn create_rabbit(&self, input: &RabbitInput) -> Result<Rabbit, StoreError> {
        let mut tables = self.write();
        tables.last_rabbit_id += 1;
        let rabbit = input.clone().into_rabbit(tables.last_rabbit_id);
        tables.rabbits.insert(rabbit.rabbit_id, rabbit.clone());
        Ok(rabbit)
    }

    async fn update_rabbit(
        &self,
        rabbit_id: i32,
        input: &RabbitInput,
    ) -> Result<Option<Rabbit>, StoreError> {
        let mut tables = self.write();
        Ok(tables.rabbits.get_mut(&rabbit_id).map(|row| {
            *row = input.clone().into_rabbit(rabbit_id);
            row.clone()
        }))
    }

    async fn delete_rabbit(&self, rabbit_id: i32) -> Result<bool, StoreError> {
        Ok(self.write().rabbits.remove(&rabbit_id).is_some())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.read().users.values().cloned().collect())
    }

    async fn get_user(&self, user_id: i32) -> Result<Option<User>, StoreError> {
        Ok(self.read().users.get(&user_id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .read()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, StoreError> {
        let mut tables = self.write();
        if tables.username_taken(&user.username, None) {
            return Err(StoreError::DuplicateUsername);
        }

        tables.last_user_id += 1;
        let row = User {
            user_id: tables.last_user_id,
            username: user.username.clone(),
            password: user.password_hash.clone(),
            email: Some(user.email.clone()),
            phone: None,
            address: None,
            gender: None,
            role: user.role.clone(),
            profile_image: None,
        };
        tables.users.insert(row.user_id, row.clone());
        Ok(row)
    }

    async fn update_user(
        &self,
        user_id: i32,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, StoreError> {
        let mut tables = self.write();
        if !tables.users.contains_key(&user_id) {
            return Ok(None);
        }
        if tables.username_taken(&update.username, Some(user_id)) {
            return Err(StoreError::DuplicateUsername);
        }

        Ok(tables.users.get_mut(&user_id).map(|row| {
            row.username = update.username.clone();
            row.email = update.email.clone();
            row.phone = update.phone.clone();
            row.address = update.address.clone();
            row.gender = update.gender.clone();
            row.profile_image = update.profile_image.clone();
            row.clone()
        }))
    }

    async fn update_profile_image(
        &self,
        user_id: i32,
        profile_image: Option<&str>,
    ) -> Result<Option<User>, StoreError> {
        Ok(self.write().users.get_mut(&user_id).map(|row| {
            row.profile_image = profile_image.map(str::to_string);
            row.clone()
        }))
    }

    async fn delete_user(&self, user_id: i32) -> Result<bool, StoreError> {
        Ok(self.write().users.remove(&user_id).is_some())
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
