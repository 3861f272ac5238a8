use std::sync::{Arc, Mutex};

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use marketplace::config::AppConfig;
use marketplace::db;
use marketplace::handlers;
use marketplace::repository::{fixture_source, MirroredRepository, SqliteMirror};
use marketplace::services::booking::BookingFacade;
use marketplace::services::clock::{Clock, SystemClock};
use marketplace::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    let mirror = SqliteMirror::new(Arc::new(Mutex::new(conn)));

    tracing::info!("using fixture at {}", config.fixture_path);
    let repo = MirroredRepository::new(
        fixture_source(&config.fixture_path),
        Box::new(mirror),
        config.mirror_key.clone(),
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let facade = BookingFacade::new(Arc::new(repo), clock.clone());
    let state = Arc::new(AppState::new(config.clone(), facade, clock));

    let app = handlers::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
