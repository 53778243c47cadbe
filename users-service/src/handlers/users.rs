//! HTTP handlers for the users collection

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::{
    error::{Error, Result},
    models::{CreateUserRequest, User},
    state::AppState,
};

/// List all users
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    let users = state.users().list().await;
    debug!(count = users.len(), "Listing users");
    Json(users)
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>> {
    match state.users().get(&user_id).await {
        Some(user) => Ok(Json(user)),
        None => {
            debug!(user_id = %user_id, "User lookup missed");
            Err(Error::NotFound(format!("User with ID {} not found", user_id)))
        }
    }
}

/// Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<User>> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected create user body");
        Error::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let new_user = request.validate().inspect_err(|e| {
        warn!(error = %e, "Create user request failed validation");
    })?;

    let now = Utc::now();
    let user = User::from_new(state.user_ids().next_id(now), new_user, now);
    state.users().append(user.clone()).await;

    info!(user_id = %user.id, "Created user");

    Ok(Json(user))
}
