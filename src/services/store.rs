use crate::models::score::{GameMode, ScoreRow};
use rusqlite::{params, Connection, Row};

/// Read and append operations the leaderboard needs from storage.
pub trait ScoreStore {
    type Error: std::fmt::Display;

    /// Rows of `mode`, highest score first, equal scores in insertion order.
    fn query_top_scores(&self, mode: GameMode, limit: usize) -> Result<Vec<ScoreRow>, Self::Error>;

    /// The player's rows of `mode`, each paired with its dense rank among
    /// every row of that mode. Highest score first.
    fn query_ranked_player_scores(
        &self,
        player_id: &str,
        mode: GameMode,
        limit: usize,
    ) -> Result<Vec<(i64, ScoreRow)>, Self::Error>;

    /// Appends one row and returns the number of rows affected.
    fn insert_score(&self, row: &ScoreRow) -> Result<usize, Self::Error>;
}

fn read_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<ScoreRow> {
    Ok(ScoreRow {
        player_id: row.get(offset)?,
        player_name: row.get(offset + 1)?,
        score: row.get(offset + 2)?,
        mode: row.get(offset + 3)?,
        seed: row.get(offset + 4)?,
        created_date: row.get(offset + 5)?,
    })
}

impl ScoreStore for Connection {
    type Error = rusqlite::Error;

    fn query_top_scores(&self, mode: GameMode, limit: usize) -> Result<Vec<ScoreRow>, Self::Error> {
        let mut stmt = self.prepare(
            "SELECT player_id, player_name, score, mode, seed, created_date
             FROM scores WHERE mode = ?1
             ORDER BY score DESC, id ASC LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![mode, limit as i64], |row| read_row(row, 0))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    fn query_ranked_player_scores(
        &self,
        player_id: &str,
        mode: GameMode,
        limit: usize,
    ) -> Result<Vec<(i64, ScoreRow)>, Self::Error> {
        // Rank over the whole mode first, filter to the player afterwards.
        let mut stmt = self.prepare(
            "SELECT score_rank, player_id, player_name, score, mode, seed, created_date
             FROM (
                 SELECT DENSE_RANK() OVER (ORDER BY score DESC) AS score_rank,
                        id, player_id, player_name, score, mode, seed, created_date
                 FROM scores WHERE mode = ?1
             )
             WHERE player_id = ?2
             ORDER BY score DESC, id ASC LIMIT ?3",
        )?;
        let rows = stmt.query_map(params![mode, player_id, limit as i64], |row| {
            Ok((row.get::<_, i64>(0)?, read_row(row, 1)?))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    fn insert_score(&self, row: &ScoreRow) -> Result<usize, Self::Error> {
        self.execute(
            "INSERT INTO scores (player_id, player_name, score, mode, seed, created_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                row.player_id,
                row.player_name,
                row.score,
                row.mode,
                row.seed,
                row.created_date,
            ],
        )
    }
}
