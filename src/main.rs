use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wallet_ledger_service::{
    api, config::Config, db::connection, db::migration, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting wallet-ledger-service");

    let config = Config::from_env();
    tracing::info!("Configuration loaded: {:?}", config);

    let db_pool =
        connection::establish_connection(&config.database_url, config.db_max_connections).await?;
    migration::run_migrations(&db_pool).await?;
    tracing::info!("Database ready");

    let app_state = Arc::new(AppState {
        config: config.clone(),
        db_pool,
    });

    let app = api::create_router(app_state).layer(CorsLayer::permissive());
    let addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
