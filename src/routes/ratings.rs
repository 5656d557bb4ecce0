use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Router;

use crate::response::{ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/new/:player", post(register_player))
        .route("/elo", get(all_ratings))
        .route("/elo/:player", get(player_rating))
}

/// Register (or reset) a player at the initial rating.
async fn register_player(
    State(state): State<AppState>,
    Path(player): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let rating = state.matches().register_player(&player)?;
    Ok(ok(HashMap::from([(player, rating)])))
}

/// The full ratings table, truncated to integers.
async fn all_ratings(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let table = state.matches().all_ratings_truncated()?;
    Ok(ok(table))
}

/// One player's truncated rating; unknown players read as the initial
/// rating without being written to the store.
async fn player_rating(
    State(state): State<AppState>,
    Path(player): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let rating = state.matches().rating_of(&player)?;
    Ok(ok(HashMap::from([(player, rating)])))
}
