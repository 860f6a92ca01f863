pub mod rabbit;
pub mod user;

use serde::{Deserialize, Serialize};

pub use rabbit::{Rabbit, RabbitInput, RabbitResponse};
pub use user::{
    LoginRequest, LoginResponse, LoginUser, NewUser, ProfileImageRequest, ProfileImageResponse,
    ProfileImageUser, ProfileUpdate, RegisterRequest, Registration, UpdateUserRequest, User,
};

/// Body carrying only a human-readable message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Response of the upload endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}
