//! Per-mode leaderboard views.

use crate::models::score::{GameMode, ModeScoreCollection, ScoreEntry, ScoreRow};
use crate::services::store::ScoreStore;

pub const LEADERBOARD_SIZE: usize = 10;

/// Ranks rows 1..n by list position after a stable descending sort.
pub fn positional_ranks(mut rows: Vec<ScoreRow>) -> Vec<ScoreEntry> {
    rows.sort_by(|a, b| b.score.cmp(&a.score));
    rows.truncate(LEADERBOARD_SIZE);
    rows.into_iter()
        .zip(1..)
        .map(|(row, rank)| row.ranked(rank))
        .collect()
}

/// Top of the mode; ties get consecutive ranks.
pub fn high_scores<S: ScoreStore>(store: &S, mode: GameMode) -> Result<Vec<ScoreEntry>, S::Error> {
    let rows = store.query_top_scores(mode, LEADERBOARD_SIZE)?;
    Ok(positional_ranks(rows))
}

/// The player's best rows, each with its dense rank among every score of
/// the mode (ties share a rank, no gaps).
pub fn player_scores<S: ScoreStore>(
    store: &S,
    player_id: &str,
    mode: GameMode,
) -> Result<Vec<ScoreEntry>, S::Error> {
    let mut ranked = store.query_ranked_player_scores(player_id, mode, LEADERBOARD_SIZE)?;
    ranked.sort_by(|(_, a), (_, b)| b.score.cmp(&a.score));
    ranked.truncate(LEADERBOARD_SIZE);
    Ok(ranked
        .into_iter()
        .map(|(rank, row)| row.ranked(rank))
        .collect())
}

pub fn mode_collection<S: ScoreStore>(
    store: &S,
    player_id: &str,
    mode: GameMode,
) -> Result<ModeScoreCollection, S::Error> {
    Ok(ModeScoreCollection {
        mode,
        player_scores: player_scores(store, player_id, mode)?,
        high_scores: high_scores(store, mode)?,
    })
}

/// One collection per game mode, in mode order.
pub fn all_modes<S: ScoreStore>(store: &S, player_id: &str) -> Result<Vec<ModeScoreCollection>, S::Error> {
    GameMode::ALL
        .iter()
        .map(|&mode| mode_collection(store, player_id, mode))
        .collect()
}
