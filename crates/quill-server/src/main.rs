use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Duration;
use tower_http::trace::TraceLayer;
use tracing::info;

use quill_api::session::{Passwords, Sessions};
use quill_api::{AppState, AppStateInner, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let secret = std::env::var("QUILL_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("QUILL_DB_PATH").unwrap_or_else(|_| "quill.db".into());
    let host = std::env::var("QUILL_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("QUILL_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;
    let admin_id: i64 = std::env::var("QUILL_ADMIN_ID")
        .unwrap_or_else(|_| "1".into())
        .parse()?;
    let fresh_secs: i64 = std::env::var("QUILL_FRESH_WINDOW_SECS")
        .unwrap_or_else(|_| "1800".into())
        .parse()?;
    let ttl_days: i64 = std::env::var("QUILL_SESSION_TTL_DAYS")
        .unwrap_or_else(|_| "7".into())
        .parse()?;

    // Init database
    let db = quill_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state
    let state: AppState = Arc::new(AppStateInner {
        db,
        sessions: Sessions::new(
            secret,
            Duration::days(ttl_days),
            Duration::seconds(fresh_secs),
        ),
        passwords: Passwords::default(),
        admin_id,
    });

    let app = routes::router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!("Quill server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
