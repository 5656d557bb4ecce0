use axum::extract::State;
use axum::routing::post;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::extractors::JsonBody;
use crate::response::{ok, AppError};
use crate::services::matches::MatchUpdate;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/match", post(record_match))
}

#[derive(Debug, Deserialize)]
struct MatchBody {
    winner: String,
    loser: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayerView {
    name: String,
    rating: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchView {
    winner: PlayerView,
    loser: PlayerView,
}

impl From<MatchUpdate> for MatchView {
    fn from(update: MatchUpdate) -> Self {
        Self {
            winner: PlayerView {
                name: update.winner,
                rating: update.winner_rating as i64,
            },
            loser: PlayerView {
                name: update.loser,
                rating: update.loser_rating as i64,
            },
        }
    }
}

async fn record_match(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<MatchBody>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let update = state.matches().record_match(&body.winner, &body.loser)?;
    Ok(ok(MatchView::from(update)))
}
