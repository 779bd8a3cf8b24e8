//! Score tokens.

use crate::config::Secret;
use crate::models::score::ScoreRequest;
use base64::Engine;
use chrono::{Datelike, NaiveDate};
use sha2::{Digest, Sha256};

const TICKS_PER_DAY: i64 = 864_000_000_000;

/// 100 ns ticks from 0001-01-01 to UTC midnight of `day`.
pub fn day_ticks(day: NaiveDate) -> i64 {
    (day.num_days_from_ce() as i64 - 1) * TICKS_PER_DAY
}

fn hex_digest(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// `base64(hex(sha256(score ++ player_id ++ seed ++ day_ticks ++ secret)))`.
/// The base64 step encodes the lowercase hex text, not the raw digest.
pub fn compute(score: i64, player_id: &str, seed: &str, day: NaiveDate, secret: &Secret) -> String {
    let material = format!(
        "{}{}{}{}{}",
        score,
        player_id,
        seed,
        day_ticks(day),
        secret.expose()
    );
    base64::engine::general_purpose::STANDARD.encode(hex_digest(&material))
}

/// Tokens only verify on the UTC day they were computed for.
pub fn verify(request: &ScoreRequest, secret: &Secret, today: NaiveDate) -> bool {
    let expected = compute(request.score, &request.player_id, &request.seed, today, secret);
    expected.as_bytes() == request.score_hash.as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::score::GameMode;
    use rand::distributions::Alphanumeric;
    use rand::Rng;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(score: i64, player_id: &str, seed: &str, score_hash: String) -> ScoreRequest {
        ScoreRequest {
            player_name: Some("Ann".into()),
            player_id: player_id.into(),
            score,
            score_hash,
            mode: GameMode::Free,
            seed: seed.into(),
        }
    }

    #[test]
    fn test_day_ticks() {
        assert_eq!(day_ticks(day(1, 1, 1)), 0);
        assert_eq!(day_ticks(day(1, 1, 2)), TICKS_PER_DAY);
        assert_eq!(day_ticks(day(2020, 1, 1)), 637_134_336_000_000_000);
    }

    #[test]
    fn test_hex_digest_is_lowercase_sha256() {
        assert_eq!(
            hex_digest("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_token_encodes_hex_text() {
        let secret = Secret::new("salt");
        let today = day(2024, 5, 1);
        let token = compute(500, "p1", "seed", today, &secret);
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(&token)
            .unwrap();
        let text = String::from_utf8(decoded).unwrap();
        assert_eq!(text.len(), 64);
        assert_eq!(
            text,
            hex_digest(&format!("500p1seed{}salt", day_ticks(today)))
        );
    }

    #[test]
    fn test_verify_matches_compute() {
        let secret = Secret::new("salt");
        let today = day(2024, 5, 1);
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let score = rng.gen_range(0..1_000_000);
            let player_id: String = (&mut rng).sample_iter(&Alphanumeric).take(12).map(char::from).collect();
            let seed: String = (&mut rng).sample_iter(&Alphanumeric).take(8).map(char::from).collect();

            let token = compute(score, &player_id, &seed, today, &secret);
            assert!(verify(&request(score, &player_id, &seed, token.clone()), &secret, today));
            assert!(!verify(&request(score + 1, &player_id, &seed, token.clone()), &secret, today));
            assert!(!verify(&request(score, &player_id, "other", token), &secret, today));
        }
    }

    #[test]
    fn test_forged_token_rejected() {
        let secret = Secret::new("salt");
        let today = day(2024, 5, 1);
        let forged = compute(500, "p1", "seed", today, &Secret::new("guess"));
        assert!(!verify(&request(500, "p1", "seed", forged), &secret, today));
        assert!(!verify(&request(500, "p1", "seed", String::new()), &secret, today));
    }

    #[test]
    fn test_token_expires_at_utc_midnight() {
        let secret = Secret::new("salt");
        let issued = day(2024, 5, 1);
        let token = compute(500, "p1", "seed", issued, &secret);
        assert!(verify(&request(500, "p1", "seed", token.clone()), &secret, issued));
        assert!(!verify(
            &request(500, "p1", "seed", token),
            &secret,
            issued.succ_opt().unwrap()
        ));
    }
}
