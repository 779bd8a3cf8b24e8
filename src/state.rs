use crate::config::Secret;
use crate::db::Db;

/// Process-wide, read-only after startup.
pub struct AppState {
    pub db: Db,
    pub secret: Secret,
}
