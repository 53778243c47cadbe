//! Route table

use axum::{routing::get, Router};

use crate::{handlers, state::AppState};

/// Build the API router for `state`, mounted under the configured base path
pub fn router(state: AppState) -> Router {
    let base = state.config().api.normalized_base_path();

    let mut router = Router::new()
        .route(
            &format!("{base}/users"),
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(&format!("{base}/users/{{id}}"), get(handlers::get_user))
        .route(&format!("{base}/health"), get(handlers::health))
        .route(&format!("{base}/"), get(handlers::index));

    if !base.is_empty() {
        router = router.route(&base, get(handlers::index));
    }

    tracing::debug!(base_path = %base, "Registered API routes");

    router.with_state(state)
}
