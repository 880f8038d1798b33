use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod config;
mod db;
mod error;
mod handlers;
mod models;

use crate::{config::CONFIG, handlers::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let pool = db::init_db_pool(&CONFIG.database_url).await?;
    let state = AppState::new(pool);
    let app = handlers::router(state).layer(TraceLayer::new_for_http());

    let addr = CONFIG.server_addr();
    tracing::info!("Starting phone tracker server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
