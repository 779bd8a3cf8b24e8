use crate::error::AppError;
use crate::services::ranking;
use crate::services::submission::SubmissionGate;
use crate::state::AppState;
use chrono::Utc;
use ntex::util::Bytes;
use ntex::web::{self, HttpResponse};
use std::sync::Arc;
use tracing::{info, warn};

pub async fn get_scores(
    state: web::types::State<Arc<AppState>>,
    path: web::types::Path<String>,
) -> Result<HttpResponse, AppError> {
    let player_id = path.into_inner();
    info!(player_id = %player_id, "get player scores");

    let state = Arc::clone(&state);
    let collections = tokio::task::spawn_blocking(move || {
        state
            .db
            .with_conn(|conn| ranking::all_modes(conn, &player_id))
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(&collections))
}

/// Always answers 200 with an empty body; the outcome is only logged.
pub async fn post_score(
    state: web::types::State<Arc<AppState>>,
    path: web::types::Path<String>,
    body: Bytes,
) -> HttpResponse {
    let player_id = path.into_inner();
    info!(player_id = %player_id, "post player score");

    let today = Utc::now().date_naive();
    let state = Arc::clone(&state);
    let submitted = tokio::task::spawn_blocking(move || {
        SubmissionGate::new(&state.secret, today).submit(&state.db, &player_id, &body)
    })
    .await;

    if let Err(e) = submitted {
        warn!("submission task failed: {}", e);
    }
    HttpResponse::Ok().finish()
}
