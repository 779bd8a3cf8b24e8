mod config;
mod db;
mod error;
mod handlers;
mod models;
mod services;
mod state;
mod validation;

use clap::Parser;
use config::Config;
use db::Db;
use ntex::web;
use ntex_cors::Cors;
use state::AppState;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[ntex::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("leaderboard_server=debug,info")),
        )
        .init();

    let config = Config::parse();
    let db = Db::open(&config.database).map_err(std::io::Error::other)?;
    let state = Arc::new(AppState {
        db,
        secret: config.hash_salt,
    });

    info!("Leaderboard server starting on {}:{}", config.host, config.port);

    web::HttpServer::new(move || {
        web::App::new()
            .state(state.clone())
            .wrap(
                Cors::new()
                    .allowed_origin("*")
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec!["Content-Type"])
                    .max_age(3600)
                    .finish(),
            )
            .configure(routes)
    })
    .bind(format!("{}:{}", config.host, config.port))?
    .run()
    .await
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health))
        .route("/score/{player_id}", web::get().to(handlers::score::get_scores))
        .route("/score/{player_id}", web::post().to(handlers::score::post_score));
}

async fn health() -> web::HttpResponse {
    web::HttpResponse::Ok().json(&serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
