//! Storefront client: API access, auth session and view state.

pub mod api;
pub mod cart;
pub mod nav;
pub mod profile;
pub mod session;

pub use api::{ApiClient, ClientError};
pub use cart::{Cart, CartLine};
pub use nav::{NavBar, Route};
pub use profile::{change_profile_image, ProfileError, ProfileForm, SelectedImage};
pub use session::{
    AuthSession, FileSessionStore, MemorySessionStore, SessionError, SessionStore, SessionUser,
};
