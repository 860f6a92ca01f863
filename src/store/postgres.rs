use async_trait::async_trait;
use sqlx::PgPool;

use super::{RabbitStore, Store, StoreError, UserStore};
use crate::models::{NewUser, ProfileUpdate, Rabbit, RabbitInput, User};

/// PostgreSQL backend; one statement per operation, no transactions
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Map a unique violation on `users.username` to the canonical duplicate error
fn map_user_write_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            return StoreError::DuplicateUsername;
        }
    }
    StoreError::Database(e)
}

#[async_trait]
impl RabbitStore for PgStore {
    async fn list_rabbits(&self) -> Result<Vec<Rabbit>, StoreError> {
        let rabbits = sqlx::query_as::<_, Rabbit>(
            r#"
            SELECT rabbit_id, seller_id, name, breed, age, gender, price,
                   description, image_url, status
            FROM rabbits
            ORDER BY rabbit_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rabbits)
    }

    async fn get_rabbit(&self, rabbit_id: i32) -> Result<Option<Rabbit>, StoreError> {
        let rabbit = sqlx::query_as::<_, Rabbit>(
            r#"
            SELECT rabbit_id, seller_id, name, breed, age, gender, price,
                   description, image_url, status
            FROM rabbits
            WHERE rabbit_id = $1
            "#,
        )
        .bind(rabbit_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rabbit)
    }

    async fn create_rabbit(&self, input: &RabbitInput) -> Result<Rabbit, StoreError> {
        let rabbit = sqlx::query_as::<_, Rabbit>(
            r#"
            INSERT INTO rabbits
                (seller_id, name, breed, age, gender, price, description, image_url, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING rabbit_id, seller_id, name, breed, age, gender, price,
                      description, image_url, status
            "#,
        )
        .bind(input.seller_id)
        .bind(&input.name)
        .bind(&input.breed)
        .bind(input.age)
        .bind(&input.gender)
        .bind(input.price)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(&input.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(rabbit)
    }

    async fn update_rabbit(
        &self,
        rabbit_id: i32,
        input: &RabbitInput,
    ) -> Result<Option<Rabbit>, StoreError> {
        let rabbit = sqlx::query_as::<_, Rabbit>(
            r#"
            UPDATE rabbits
            SET seller_id = $1, name = $2, breed = $3, age = $4, gender = $5,
                price = $6, description = $7, image_url = $8, status = $9
            WHERE rabbit_id = $10
            RETURNING rabbit_id, seller_id, name, breed, age, gender, price,
                      description, image_url, status
            "#,
        )
        .bind(input.seller_id)
        .bind(&input.name)
        .bind(&input.breed)
        .bind(input.age)
        .bind(&input.gender)
        .bind(input.price)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(&input.status)
        .bind(rabbit_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rabbit)
    }

    async fn delete_rabbit(&self, rabbit_id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM rabbits WHERE rabbit_id = $1")
            .bind(rabbit_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, password, email, phone, address, gender,
                   role, profile_image
            FROM users
            ORDER BY user_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn get_user(&self, user_id: i32) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, password, email, phone, address, gender,
                   role, profile_image
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, password, email, phone, address, gender,
                   role, profile_image
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users
                (username, password, email, phone, address, gender, role, profile_image)
            VALUES ($1, $2, $3, NULL, NULL, NULL, $4, NULL)
            RETURNING user_id, username, password, email, phone, address, gender,
                      role, profile_image
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(&user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_write_error)
    }

    async fn update_user(
        &self,
        user_id: i32,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $1, email = $2, phone = $3, address = $4, gender = $5,
                profile_image = $6
            WHERE user_id = $7
            RETURNING user_id, username, password, email, phone, address, gender,
                      role, profile_image
            "#,
        )
        .bind(&update.username)
        .bind(&update.email)
        .bind(&update.phone)
        .bind(&update.address)
        .bind(&update.gender)
        .bind(&update.profile_image)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_write_error)
    }

    async fn update_profile_image(
        &self,
        user_id: i32,
        profile_image: Option<&str>,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET profile_image = $1
            WHERE user_id = $2
            RETURNING user_id, username, password, email, phone, address, gender,
                      role, profile_image
            "#,
        )
        .bind(profile_image)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete_user(&self, user_id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
