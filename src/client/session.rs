//! Client-side auth session.
//!
//! The session is a plain value owned by the caller. It is read from a
//! [`SessionStore`] once with [`AuthSession::load`] and written back only
//! when [`AuthSession::save`] is called; mutators never touch storage.
//!
//! Nothing here is verified by the server: the stored user is whatever the
//! last successful login (or the mock Google login) produced.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{LoginUser, ProfileImageUser, User};

/// Key under which the user record is persisted
pub const SESSION_STORAGE_KEY: &str = "user";

/// Identifier of the fabricated Google user
pub const MOCK_GOOGLE_USER_ID: i32 = 9999;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Logged-in user as held by the client; absent fields are empty strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: i32,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub gender: String,
    #[serde(rename = "profileImage", alias = "profile_image", default)]
    pub profile_image: String,
}

fn or_empty(value: Option<String>) -> String {
    value.unwrap_or_default()
}

impl From<User> for SessionUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: or_empty(user.email),
            phone: or_empty(user.phone),
            address: or_empty(user.address),
            gender: or_empty(user.gender),
            profile_image: or_empty(user.profile_image),
        }
    }
}

impl From<LoginUser> for SessionUser {
    fn from(user: LoginUser) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: or_empty(user.email),
            phone: or_empty(user.phone),
            address: or_empty(user.address),
            gender: String::new(),
            profile_image: or_empty(user.profile_image),
        }
    }
}

impl From<ProfileImageUser> for SessionUser {
    fn from(user: ProfileImageUser) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: or_empty(user.email),
            phone: or_empty(user.phone),
            address: or_empty(user.address),
            gender: String::new(),
            profile_image: or_empty(user.profile_image),
        }
    }
}

/// Persistent slot for at most one [`SessionUser`]
pub trait SessionStore {
    fn load(&self) -> Result<Option<SessionUser>, SessionError>;

    fn save(&self, user: &SessionUser) -> Result<(), SessionError>;

    fn clear(&self) -> Result<(), SessionError>;
}

/// JSON document on disk; the user lives under [`SESSION_STORAGE_KEY`]
/// and any other keys in the document are preserved
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Map<String, Value>, SessionError> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(Map::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(document)?)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<SessionUser>, SessionError> {
        match self.read_document()?.remove(SESSION_STORAGE_KEY) {
            Some(Value::Null) | None => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    fn save(&self, user: &SessionUser) -> Result<(), SessionError> {
        let mut document = self.read_document().unwrap_or_default();
        document.insert(SESSION_STORAGE_KEY.to_string(), serde_json::to_value(user)?);
        self.write_document(&document)
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut document = self.read_document().unwrap_or_default();
        if document.remove(SESSION_STORAGE_KEY).is_none() && !self.path.exists() {
            return Ok(());
        }
        self.write_document(&document)
    }
}

/// In-process slot for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<SessionUser>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<SessionUser>, SessionError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, user: &SessionUser) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// The current client's logged-in user, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    user: Option<SessionUser>,
    dirty: bool,
}

impl AuthSession {
    /// Logged-out session that has never been persisted
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the persisted user
    ///
    /// An unreadable record is treated as logged out rather than an error,
    /// so a corrupt file never locks the client out.
    pub fn load(store: &impl SessionStore) -> Result<Self, SessionError> {
        let user = match store.load() {
            Ok(user) => user,
            Err(SessionError::Json(e)) => {
                tracing::warn!("Discarding unreadable session record: {}", e);
                None
            }
            Err(e) => return Err(e),
        };
        Ok(Self { user, dirty: false })
    }

    /// Persist the current state: write the user, or clear the slot when logged out
    pub fn save(&mut self, store: &impl SessionStore) -> Result<(), SessionError> {
        match &self.user {
            Some(user) => store.save(user)?,
            None => store.clear()?,
        }
        self.dirty = false;
        Ok(())
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Whether there are changes not yet written by [`AuthSession::save`]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replace the user with any server shape, normalized to [`SessionUser`]
    pub fn login(&mut self, user: impl Into<SessionUser>) {
        self.user = Some(user.into());
        self.dirty = true;
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.dirty = true;
    }

    /// Log in as a fixed mock account; nothing is verified with Google
    pub fn login_with_google(&mut self) {
        self.login(SessionUser {
            user_id: MOCK_GOOGLE_USER_ID,
            username: "google_user".to_string(),
            email: "google@example.com".to_string(),
            ..SessionUser::default()
        });
    }
}
