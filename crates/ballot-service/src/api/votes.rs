//! Vote handlers.
//!
//! Each call bumps the shared request counter exactly once; the returned total
//! doubles as the request's activity id in logs.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use ballot_core::BallotError;

use super::error::ApiError;
use crate::app_state::AppState;

/// Longest accepted vote key, in bytes.
pub const MAX_KEY_LEN: usize = 256;

/// One `(key, count)` pair as returned by `GET /api/votes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteEntry {
    pub key: String,
    pub value: u64,
}

fn validate_key(key: &str) -> Result<(), BallotError> {
    if key.is_empty() {
        return Err(BallotError::BadRequest("vote key must not be empty".into()));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(BallotError::BadRequest(format!(
            "vote key is {} bytes; at most {MAX_KEY_LEN} allowed",
            key.len()
        )));
    }
    Ok(())
}

fn begin(app: &AppState, op: &'static str) -> u64 {
    let activity = app.requests().record();
    app.metrics().requests.inc(&[("op", op)]);
    activity
}

pub async fn list_votes(State(app): State<AppState>) -> Json<Vec<VoteEntry>> {
    let activity = begin(&app, "list");
    tracing::debug!(activity, "list votes");

    let votes = app
        .store()
        .snapshot()
        .into_iter()
        .map(|(key, value)| VoteEntry { key, value })
        .collect();
    Json(votes)
}

pub async fn cast_vote(
    State(app): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode, ApiError> {
    let activity = begin(&app, "increment");
    validate_key(&key)?;
    tracing::debug!(activity, %key, "cast vote");

    app.store().increment(&key);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_votes(
    State(app): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<u64>, ApiError> {
    let activity = begin(&app, "delete");
    validate_key(&key)?;

    match app.store().delete(&key) {
        Some(count) => {
            tracing::debug!(activity, %key, count, "votes deleted");
            Ok(Json(count))
        }
        None => {
            tracing::debug!(activity, %key, "delete on absent key");
            Err(BallotError::NotFound(format!("no votes for {key}")).into())
        }
    }
}
