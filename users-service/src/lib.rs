//! # users-service
//!
//! A small HTTP API over an in-memory list of users, built on axum.
//!
//! ## Endpoints
//!
//! All routes live under the configured base path (`/api` by default):
//!
//! - `GET /api` - interactive documentation page
//! - `GET /api/users` - every user, in insertion order
//! - `POST /api/users` - create a user from `{"name", "email"}`
//! - `GET /api/users/{id}` - one user, or 404
//! - `GET /api/health` - `{"status": "ok", "time": ...}`
//!
//! ## Example
//!
//! ```rust,no_run
//! use users_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let state = AppState::new(config.clone());
//!     let app = router(state);
//!
//!     Server::new(config).serve(app).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod ids;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ApiConfig, Config, MiddlewareConfig, ServiceConfig};
    pub use crate::error::{Error, ErrorResponse, Result};
    pub use crate::models::{CreateUserRequest, HealthResponse, NewUser, User, UserValidationError};
    pub use crate::observability::init_tracing;
    pub use crate::routes::router;
    pub use crate::server::Server;
    pub use crate::state::AppState;
    pub use crate::store::UserStore;
}
