pub mod auth;
pub mod health;
pub mod rabbits;
pub mod upload;
pub mod users;
pub mod validation;

pub use auth::{login_user, register_user};
pub use health::health_check;
pub use rabbits::{create_rabbit, delete_rabbit, get_rabbit, list_rabbits, update_rabbit};
pub use upload::upload_file;
pub use users::{delete_user, get_user, list_users, update_profile_image, update_user};
pub use validation::{parse_id, AppJson};
