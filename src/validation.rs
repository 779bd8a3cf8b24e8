use thiserror::Error;

const MAX_PLAYER_NAME_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidField {
    #[error("score cannot be negative")]
    NegativeScore,
    #[error("player id is empty")]
    EmptyPlayerId,
}

pub fn validate_player_name(name: Option<&str>) -> String {
    let trimmed = name.unwrap_or_default().trim();
    if trimmed.is_empty() {
        "Anonymous".to_string()
    } else {
        trimmed.chars().take(MAX_PLAYER_NAME_LEN).collect()
    }
}

pub fn validate_score(score: i64) -> Result<(), InvalidField> {
    if score < 0 {
        Err(InvalidField::NegativeScore)
    } else {
        Ok(())
    }
}

pub fn validate_player_id(player_id: &str) -> Result<(), InvalidField> {
    if player_id.is_empty() {
        Err(InvalidField::EmptyPlayerId)
    } else {
        Ok(())
    }
}
