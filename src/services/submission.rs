//! Score submission: parse, verify, authorize, persist, or drop.

use crate::config::Secret;
use crate::db::Db;
use crate::models::score::{ScoreRequest, ScoreRow};
use crate::services::integrity;
use crate::services::store::ScoreStore;
use crate::validation::{self, InvalidField};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Dropped {
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("invalid field: {0}")]
    Invalid(#[from] InvalidField),
    #[error("score hash mismatch")]
    TokenMismatch,
    #[error("path player id does not match payload")]
    PlayerMismatch,
    #[error("insert affected {0} rows")]
    RowsAffected(usize),
    #[error("store error: {0}")]
    Store(String),
}

impl Dropped {
    pub fn stage(&self) -> &'static str {
        match self {
            Dropped::Malformed(_) | Dropped::Invalid(_) => "parse",
            Dropped::TokenMismatch => "verify",
            Dropped::PlayerMismatch => "authorize",
            Dropped::RowsAffected(_) | Dropped::Store(_) => "persist",
        }
    }
}

impl From<rusqlite::Error> for Dropped {
    fn from(e: rusqlite::Error) -> Self {
        Dropped::Store(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Persisted,
    Dropped(Dropped),
}

pub struct SubmissionGate<'a> {
    secret: &'a Secret,
    today: NaiveDate,
}

impl<'a> SubmissionGate<'a> {
    pub fn new(secret: &'a Secret, today: NaiveDate) -> Self {
        SubmissionGate { secret, today }
    }

    pub fn parse(&self, body: &[u8]) -> Result<ScoreRequest, Dropped> {
        let request: ScoreRequest =
            serde_json::from_slice(body).map_err(|e| Dropped::Malformed(e.to_string()))?;
        validation::validate_player_id(&request.player_id)?;
        validation::validate_score(request.score)?;
        Ok(request)
    }

    pub fn verify(&self, request: &ScoreRequest) -> Result<(), Dropped> {
        if integrity::verify(request, self.secret, self.today) {
            Ok(())
        } else {
            Err(Dropped::TokenMismatch)
        }
    }

    pub fn authorize(&self, path_player_id: &str, request: &ScoreRequest) -> Result<(), Dropped> {
        if path_player_id == request.player_id {
            Ok(())
        } else {
            Err(Dropped::PlayerMismatch)
        }
    }

    /// Runs every step up to persistence and returns the row to store.
    pub fn admit(&self, path_player_id: &str, body: &[u8]) -> Result<ScoreRow, Dropped> {
        let request = self.parse(body)?;
        self.verify(&request)?;
        self.authorize(path_player_id, &request)?;

        Ok(ScoreRow {
            player_name: validation::validate_player_name(request.player_name.as_deref()),
            player_id: request.player_id,
            score: request.score,
            mode: request.mode,
            seed: request.seed,
            created_date: self.today,
        })
    }

    pub fn persist<S: ScoreStore>(&self, store: &S, row: &ScoreRow) -> Result<(), Dropped> {
        match store.insert_score(row) {
            Ok(1) => Ok(()),
            Ok(n) => Err(Dropped::RowsAffected(n)),
            Err(e) => Err(Dropped::Store(e.to_string())),
        }
    }

    /// Full pipeline. Every drop is logged here; callers see no difference.
    /// Opens a store connection only once the submission has been admitted.
    pub fn submit(&self, db: &Db, path_player_id: &str, body: &[u8]) -> Outcome {
        let result = self
            .admit(path_player_id, body)
            .and_then(|row| db.with_conn(|conn| self.persist(conn, &row)));

        match result {
            Ok(()) => {
                info!(player_id = %path_player_id, "score persisted");
                Outcome::Persisted
            }
            Err(dropped) => {
                if matches!(dropped, Dropped::RowsAffected(_) | Dropped::Store(_)) {
                    warn!(player_id = %path_player_id, stage = dropped.stage(), "submission dropped: {}", dropped);
                } else {
                    info!(player_id = %path_player_id, stage = dropped.stage(), "submission dropped: {}", dropped);
                }
                Outcome::Dropped(dropped)
            }
        }
    }
}
