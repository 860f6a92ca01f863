//! Profile editor form.
//!
//! Mirrors the profile page: it refetches the account when opened, edits
//! a local copy of the fields, and pushes changes back into the
//! [`AuthSession`]. Persisting the session is left to the caller.

use chrono::Utc;
use thiserror::Error;

use super::api::{ApiClient, ClientError};
use super::session::{AuthSession, SessionUser};
use crate::models::UpdateUserRequest;

/// Required length of a phone number
pub const PHONE_DIGITS: usize = 10;

#[derive(Error, Debug)]
pub enum ProfileError {
    /// The caller should route to the login page
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("กรุณากรอกเบอร์โทรศัพท์ให้ครบ 10 ตัว")]
    InvalidPhone,

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Image picked by the user, not yet uploaded
#[derive(Debug, Clone)]
pub struct SelectedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Editable profile fields; the username is shown but not editable
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub gender: String,
}

impl ProfileForm {
    pub fn from_user(user: &SessionUser) -> Self {
        Self {
            email: user.email.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
            gender: user.gender.clone(),
        }
    }

    /// Refetch the logged-in account, refresh the session, and fill the form
    ///
    /// If the refetch fails the form falls back to the session copy.
    pub async fn load(api: &ApiClient, session: &mut AuthSession) -> Result<Self, ProfileError> {
        let user_id = session.user().ok_or(ProfileError::NotLoggedIn)?.user_id;

        match api.get_user(user_id).await {
            Ok(user) => session.login(user),
            Err(e) => tracing::warn!(user_id, "Could not refresh profile: {}", e),
        }

        let user = session.user().ok_or(ProfileError::NotLoggedIn)?;
        Ok(Self::from_user(user))
    }

    /// Empty, or exactly [`PHONE_DIGITS`] ASCII digits
    pub fn validate_phone(phone: &str) -> Result<(), ProfileError> {
        let phone = phone.trim();
        if phone.is_empty()
            || (phone.len() == PHONE_DIGITS && phone.chars().all(|c| c.is_ascii_digit()))
        {
            Ok(())
        } else {
            Err(ProfileError::InvalidPhone)
        }
    }

    /// Save the form, uploading `image` first when one was picked
    ///
    /// Returns the refreshed session user.
    pub async fn save(
        &self,
        api: &ApiClient,
        session: &mut AuthSession,
        image: Option<SelectedImage>,
    ) -> Result<SessionUser, ProfileError> {
        Self::validate_phone(&self.phone)?;
        let current = session.user().cloned().ok_or(ProfileError::NotLoggedIn)?;

        let uploaded = match image {
            Some(image) => Some(api.upload(&image.file_name, image.bytes).await?.url),
            None => None,
        };
        let profile_image = uploaded
            .clone()
            .unwrap_or_else(|| strip_cache_buster(&current.profile_image).to_string());

        let request = UpdateUserRequest {
            username: Some(current.username.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.trim().to_string()),
            address: Some(self.address.clone()),
            gender: Some(self.gender.clone()),
            profile_image: Some(profile_image),
        };

        let updated = match api.update_user(current.user_id, &request).await {
            Ok(updated) => updated,
            Err(e) => {
                if let Some(url) = &uploaded {
                    tracing::warn!(orphaned_upload = %url, "Profile update failed: {}", e);
                }
                return Err(e.into());
            }
        };
        session.login(updated);
        tracing::info!(user_id = current.user_id, "Profile saved");

        session.user().cloned().ok_or(ProfileError::NotLoggedIn)
    }
}

/// Upload a new avatar and point the account at it
///
/// The session copy gets a `?t=<millis>` suffix so views refetch the image.
/// Upload and update are separate requests: if the update fails, the
/// uploaded file is left orphaned on the server and its URL is logged.
pub async fn change_profile_image(
    api: &ApiClient,
    session: &mut AuthSession,
    image: SelectedImage,
) -> Result<SessionUser, ProfileError> {
    let current = session.user().cloned().ok_or(ProfileError::NotLoggedIn)?;

    let url = api.upload(&image.file_name, image.bytes).await?.url;

    let response = match api.update_profile_image(current.user_id, &url).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(orphaned_upload = %url, "Profile image update failed: {}", e);
            return Err(e.into());
        }
    };

    let mut user = SessionUser::from(response.user);
    // The profile-image response omits gender
    if user.gender.is_empty() {
        user.gender = current.gender;
    }
    user.profile_image = with_cache_buster(&url, Utc::now().timestamp_millis());
    session.login(user);

    session.user().cloned().ok_or(ProfileError::NotLoggedIn)
}

fn with_cache_buster(url: &str, millis: i64) -> String {
    format!("{}?t={}", strip_cache_buster(url), millis)
}

/// Drop the client-only `?t=` suffix before a URL goes back to the server
fn strip_cache_buster(url: &str) -> &str {
    match url.rfind("?t=") {
        Some(index) => &url[..index],
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(ProfileForm::validate_phone("").is_ok());
        assert!(ProfileForm::validate_phone("0812345678").is_ok());
        assert!(ProfileForm::validate_phone(" 0812345678 ").is_ok());
        assert!(ProfileForm::validate_phone("081234567").is_err());
        assert!(ProfileForm::validate_phone("08123456789").is_err());
        assert!(ProfileForm::validate_phone("08123x5678").is_err());
    }

    #[test]
    fn test_cache_buster() {
        let url = "http://localhost:3000/uploads/1.png";
        let busted = with_cache_buster(url, 42);
        assert_eq!(busted, "http://localhost:3000/uploads/1.png?t=42");
        assert_eq!(strip_cache_buster(&busted), url);
        assert_eq!(with_cache_buster(&busted, 43), format!("{}?t=43", url));
        assert_eq!(strip_cache_buster(""), "");
    }

    #[test]
    fn test_form_from_user() {
        let user = SessionUser {
            user_id: 1,
            username: "tae".to_string(),
            email: "tae@example.com".to_string(),
            phone: "0812345678".to_string(),
            address: "Bangkok".to_string(),
            gender: "male".to_string(),
            profile_image: String::new(),
        };

        let form = ProfileForm::from_user(&user);
        assert_eq!(form.email, "tae@example.com");
        assert_eq!(form.gender, "male");
    }

    #[tokio::test]
    async fn test_load_without_session_is_not_logged_in() {
        let api = ApiClient::new("http://127.0.0.1:9");
        let mut session = AuthSession::new();

        let result = ProfileForm::load(&api, &mut session).await;
        assert!(matches!(result, Err(ProfileError::NotLoggedIn)));
    }
}
