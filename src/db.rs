use rusqlite::Connection;
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

const SCHEMA: &str = include_str!("schema.sql");
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection target for the score store. Each caller gets its own
/// connection for the span of one `with_conn` call.
pub struct Db {
    target: String,
    // Shared-cache in-memory databases vanish with their last connection.
    _anchor: Option<Mutex<Connection>>,
}

fn is_memory_target(path: &str) -> bool {
    path.is_empty() || path == ":memory:" || path.contains("mode=memory")
}

fn is_shared_memory_target(path: &str) -> bool {
    path.starts_with("file:") && path.contains("mode=memory") && path.contains("cache=shared")
}

impl Db {
    /// Opens a file database. In-memory targets are private to a single
    /// connection, so they are replaced by an anchored shared-cache one.
    pub fn open(path: &str) -> Result<Self, rusqlite::Error> {
        if is_shared_memory_target(path) {
            return Self::anchored(path.to_string());
        }
        if is_memory_target(path) {
            return Self::open_in_memory();
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Db {
            target: path.to_string(),
            _anchor: None,
        })
    }

    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::anchored(format!(
            "file:leaderboard-{}?mode=memory&cache=shared",
            Uuid::new_v4()
        ))
    }

    fn anchored(target: String) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(&target)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Db {
            target,
            _anchor: Some(Mutex::new(conn)),
        })
    }

    fn connect(&self) -> Result<Connection, rusqlite::Error> {
        let conn = Connection::open(&self.target)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// Opens a fresh connection, runs `f` on it and closes it again,
    /// whatever `f` returns.
    pub fn with_conn<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<rusqlite::Error>,
    {
        let conn = self.connect()?;
        f(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_across_connections(db: &Db) -> i64 {
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO scores (player_id, player_name, score, mode, seed, created_date)
                 VALUES ('p1', 'Ann', 10, 1, 's', '2024-05-01')",
                [],
            )
        })
        .unwrap();
        db.with_conn(|conn| conn.query_row("SELECT COUNT(*) FROM scores", [], |row| row.get(0)))
            .unwrap()
    }

    #[test]
    fn test_private_memory_targets_are_shared() {
        for target in [":memory:", "", "file:scores?mode=memory"] {
            let db = Db::open(target).unwrap();
            assert!(db._anchor.is_some());
            assert_eq!(count_across_connections(&db), 1);
        }
    }

    #[test]
    fn test_shared_memory_uri_kept_alive() {
        let target = format!("file:scores-{}?mode=memory&cache=shared", Uuid::new_v4());
        let db = Db::open(&target).unwrap();
        assert_eq!(db.target, target);
        assert_eq!(count_across_connections(&db), 1);
    }

    #[test]
    fn test_file_target_has_no_anchor() {
        let dir = std::env::temp_dir().join(format!("leaderboard-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("scores.db");
        let db = Db::open(path.to_str().unwrap()).unwrap();
        assert!(db._anchor.is_none());
        assert_eq!(count_across_connections(&db), 1);
        drop(db);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
