use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use storybook_api::{AppState, AppStateInner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storybook=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("STORYBOOK_DB_PATH").unwrap_or_else(|_| "storybook.db".into());
    let host = std::env::var("STORYBOOK_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("STORYBOOK_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init database
    let db = storybook_db::Database::open(&PathBuf::from(&db_path))?;

    // Legacy rows predate share ids; assign them one. No-op once done.
    let backfilled = db.backfill_share_ids()?;
    if backfilled > 0 {
        info!("Assigned share ids to {} legacy stories", backfilled);
    }

    let state: AppState = Arc::new(AppStateInner { db });

    let app = storybook_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Storybook server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
