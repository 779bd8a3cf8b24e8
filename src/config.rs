use clap::Parser;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "leaderboard-server")]
#[command(about = "Per-mode game leaderboards with signed score submission")]
pub struct Config {
    /// SQLite database path or URI; in-memory targets are shared by all requests
    #[arg(long, env = "SQLConnectionString")]
    pub database: String,

    /// Server-side secret mixed into every score token
    #[arg(long, env = "HashSalt", hide_env_values = true)]
    pub hash_salt: Secret,

    /// Server host
    #[arg(long, default_value = "0.0.0.0", env = "HOST")]
    pub host: String,

    /// Server port
    #[arg(short, long, default_value = "3001", env = "PORT")]
    pub port: u16,
}

/// The token secret. Never printed.
#[derive(Clone)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Secret(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl FromStr for Secret {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Secret::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_from_args() {
        let config = Config::try_parse_from([
            "leaderboard-server",
            "--database",
            "scores.db",
            "--hash-salt",
            "pepper",
            "--port",
            "8080",
        ])
        .unwrap();
        assert_eq!(config.database, "scores.db");
        assert_eq!(config.hash_salt.expose(), "pepper");
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_secret_is_redacted() {
        let secret = Secret::new("pepper");
        assert!(!format!("{:?}", secret).contains("pepper"));
    }
}
