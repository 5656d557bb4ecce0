//! Elo rating math: expected-score formula with a fixed K-factor.

/// K-factor for Elo updates
pub const K_FACTOR: f64 = 32.0;

/// Rating assigned to players that have never been seen
pub const INITIAL_RATING: f64 = 1600.0;

/// Update both sides' ratings after a decided match.
/// Returns (new_winner_rating, new_loser_rating).
///
/// Each side's expected score is computed from its own exponentiated
/// rating; the loser's share is NOT derived as `1 - e_winner`, so the
/// result is bit-identical to evaluating both formulas independently.
/// Ratings are unbounded: repeated lopsided results can drive a rating
/// negative, and that is accepted behavior.
pub fn update(winner_rating: f64, loser_rating: f64) -> (f64, f64) {
    let q_winner = 10.0_f64.powf(winner_rating / 400.0);
    let q_loser = 10.0_f64.powf(loser_rating / 400.0);

    let e_winner = q_winner / (q_winner + q_loser);
    let e_loser = q_loser / (q_winner + q_loser);

    let new_winner = winner_rating + K_FACTOR * (1.0 - e_winner);
    let new_loser = loser_rating - K_FACTOR * e_loser;

    (new_winner, new_loser)
}
