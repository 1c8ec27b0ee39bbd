//! Axum router wiring.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{api::votes, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/votes", get(votes::list_votes))
        .route("/api/votes/", get(votes::list_votes))
        .route(
            "/api/votes/:key",
            post(votes::cast_vote).delete(votes::delete_votes),
        )
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
