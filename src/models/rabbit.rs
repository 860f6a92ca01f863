use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rabbit listing as stored in the `rabbits` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Rabbit {
    pub rabbit_id: i32,
    /// Account that listed the rabbit (not checked against `users`)
    pub seller_id: Option<i32>,
    pub name: String,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub price: Decimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
}

/// Body of create and full-update requests
///
/// Every column except the identifier is overwritten; nullable columns
/// left out of the body are written as NULL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RabbitInput {
    pub seller_id: Option<i32>,
    pub name: String,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub price: Decimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
}

impl RabbitInput {
    /// Build the row this input produces under the given identifier
    pub fn into_rabbit(self, rabbit_id: i32) -> Rabbit {
        Rabbit {
            rabbit_id,
            seller_id: self.seller_id,
            name: self.name,
            breed: self.breed,
            age: self.age,
            gender: self.gender,
            price: self.price,
            description: self.description,
            image_url: self.image_url,
            status: self.status,
        }
    }
}

/// Response for create and update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RabbitResponse {
    pub message: String,
    pub rabbit: Rabbit,
}
