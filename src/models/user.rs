use serde::{Deserialize, Serialize};

/// Account as stored in the `users` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub user_id: i32,
    pub username: String,
    /// bcrypt hash; never serialized into responses
    #[serde(skip)]
    pub password: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub role: String,
    pub profile_image: Option<String>,
}

/// Account ready for insertion (password already hashed)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub role: String,
}

/// Registration body; presence is checked by the handler
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

/// Registration fields after presence checks
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl RegisterRequest {
    /// All three fields present and non-empty, or `None`
    pub fn into_registration(self) -> Option<Registration> {
        Some(Registration {
            username: non_empty(self.username)?,
            password: non_empty(self.password)?,
            email: non_empty(self.email)?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// `(username, password)` when both are present and non-empty
    pub fn credentials(self) -> Option<(String, String)> {
        Some((non_empty(self.username)?, non_empty(self.password)?))
    }
}

/// Subset of the account returned by a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginUser {
    pub user_id: i32,
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub profile_image: Option<String>,
}

impl From<User> for LoginUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            phone: user.phone,
            address: user.address,
            profile_image: user.profile_image,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: LoginUser,
}

/// Full-row profile edit body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    #[serde(rename = "profileImage")]
    pub profile_image: Option<String>,
}

/// Column values written by a profile edit
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub profile_image: Option<String>,
}

impl UpdateUserRequest {
    /// Normalize the body: empty strings become NULL. `None` if the
    /// username is missing, since the column is NOT NULL.
    pub fn into_update(self) -> Option<ProfileUpdate> {
        Some(ProfileUpdate {
            username: non_empty(self.username)?,
            email: non_empty(self.email),
            phone: non_empty(self.phone),
            address: non_empty(self.address),
            gender: non_empty(self.gender),
            profile_image: non_empty(self.profile_image),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileImageRequest {
    #[serde(rename = "profileImage")]
    pub profile_image: Option<String>,
}

/// Subset of the account returned after a profile-image change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileImageUser {
    pub user_id: i32,
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "profileImage")]
    pub profile_image: Option<String>,
}

impl From<User> for ProfileImageUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            phone: user.phone,
            address: user.address,
            profile_image: user.profile_image,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileImageResponse {
    pub message: String,
    pub user: ProfileImageUser,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
