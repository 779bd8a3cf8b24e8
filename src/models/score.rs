use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Game mode. The integer values are what clients send and what the
/// `scores.mode` column holds, so existing members keep their numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum GameMode {
    Free = 1,
    Timed = 2,
    Pursuit = 3,
    DailyRace = 4,
}

#[derive(Debug, Error)]
#[error("unknown game mode: {0}")]
pub struct UnknownMode(pub i64);

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Free,
        GameMode::Timed,
        GameMode::Pursuit,
        GameMode::DailyRace,
    ];

    pub fn id(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for GameMode {
    type Error = UnknownMode;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(GameMode::Free),
            2 => Ok(GameMode::Timed),
            3 => Ok(GameMode::Pursuit),
            4 => Ok(GameMode::DailyRace),
            other => Err(UnknownMode(other)),
        }
    }
}

impl From<GameMode> for i64 {
    fn from(mode: GameMode) -> Self {
        mode.id()
    }
}

impl ToSql for GameMode {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.id()))
    }
}

impl FromSql for GameMode {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = i64::column_result(value)?;
        GameMode::try_from(raw).map_err(|_| FromSqlError::OutOfRange(raw))
    }
}

/// One persisted score, as stored. Rank is not a column.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub player_id: String,
    pub player_name: String,
    pub score: i64,
    pub mode: GameMode,
    pub seed: String,
    pub created_date: NaiveDate,
}

impl ScoreRow {
    pub fn ranked(self, rank: i64) -> ScoreEntry {
        ScoreEntry {
            rank,
            player_name: self.player_name,
            player_id: self.player_id,
            score: self.score,
            mode: self.mode,
            seed: self.seed,
            created_date: self.created_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub rank: i64,
    pub player_name: String,
    pub player_id: String,
    pub score: i64,
    pub mode: GameMode,
    pub seed: String,
    #[serde(serialize_with = "serialize_day")]
    pub created_date: NaiveDate,
}

// Clients parse this as a date-time; the time part is always midnight UTC.
fn serialize_day<S: Serializer>(day: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&day.format("%Y-%m-%dT00:00:00"))
}

/// Body of `POST /score/{playerId}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    #[serde(default, alias = "PlayerName")]
    pub player_name: Option<String>,
    #[serde(alias = "PlayerId")]
    pub player_id: String,
    #[serde(alias = "Score")]
    pub score: i64,
    #[serde(alias = "ScoreHash")]
    pub score_hash: String,
    #[serde(alias = "Mode")]
    pub mode: GameMode,
    #[serde(alias = "Seed")]
    pub seed: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeScoreCollection {
    pub mode: GameMode,
    pub player_scores: Vec<ScoreEntry>,
    pub high_scores: Vec<ScoreEntry>,
}
