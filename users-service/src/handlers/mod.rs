//! Request handlers

pub mod docs;
pub mod health;
pub mod users;

pub use docs::index;
pub use health::health;
pub use users::{create_user, get_user, list_users};
