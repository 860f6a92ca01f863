//! Storage backends for rabbits and users.
//!
//! Handlers only see the [`RabbitStore`] and [`UserStore`] traits through
//! [`Store`]. [`PgStore`] runs every operation as a single parameterized
//! statement against PostgreSQL; [`MemoryStore`] keeps the same contract in
//! process for local runs and tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewUser, ProfileUpdate, Rabbit, RabbitInput, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The username uniqueness constraint rejected a write
    #[error("Username already exists")]
    DuplicateUsername,
}

#[async_trait]
pub trait RabbitStore: Send + Sync {
    /// All listings ordered by identifier
    async fn list_rabbits(&self) -> Result<Vec<Rabbit>, StoreError>;

    async fn get_rabbit(&self, rabbit_id: i32) -> Result<Option<Rabbit>, StoreError>;

    async fn create_rabbit(&self, input: &RabbitInput) -> Result<Rabbit, StoreError>;

    /// Overwrite every column; `None` if no such row
    async fn update_rabbit(
        &self,
        rabbit_id: i32,
        input: &RabbitInput,
    ) -> Result<Option<Rabbit>, StoreError>;

    /// `false` if no such row
    async fn delete_rabbit(&self, rabbit_id: i32) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// All accounts ordered by identifier
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn get_user(&self, user_id: i32) -> Result<Option<User>, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Fails with [`StoreError::DuplicateUsername`] if the username is taken
    async fn create_user(&self, user: &NewUser) -> Result<User, StoreError>;

    async fn update_user(
        &self,
        user_id: i32,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, StoreError>;

    /// Overwrite only `profile_image`
    async fn update_profile_image(
        &self,
        user_id: i32,
        profile_image: Option<&str>,
    ) -> Result<Option<User>, StoreError>;

    async fn delete_user(&self, user_id: i32) -> Result<bool, StoreError>;
}

/// Everything the HTTP layer needs from a backend
#[async_trait]
pub trait Store: RabbitStore + UserStore {
    /// Short backend name for health reporting
    fn backend(&self) -> &'static str;

    /// Check the backend is reachable
    async fn ping(&self) -> Result<(), StoreError>;
}
