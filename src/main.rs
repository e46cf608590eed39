use std::net::SocketAddr;
use std::sync::Arc;

use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rust_promo_leads::config::Config;
use rust_promo_leads::db::Database;
use rust_promo_leads::db_storage::PgLeadStore;
use rust_promo_leads::handlers::AppState;
use rust_promo_leads::routes;

/// Main entry point for the application.
///
/// This function initializes the application, including:
/// - Logging and tracing.
/// - Configuration loading.
/// - Database connection and schema.
/// - HTTP routes and middleware (body limit, rate limiting on the form).
///
/// It then starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_promo_leads=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize database connection pool
    let db = Database::new(&config.database_url, config.db_max_connections).await?;
    db.ensure_schema().await?;
    tracing::info!("Database connection pool established");

    let app_state = Arc::new(AppState::new(Arc::new(PgLeadStore::new(db.pool.clone()))));

    // Configure rate limiter for the signup form: 5 requests/second per IP, burst of 10
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(5)
            .burst_size(10)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?,
    );

    let signup_routes = routes::signup_routes().layer(GovernorLayer {
        config: governor_conf,
    });

    // Pages and health check bypass rate limiting
    let app = routes::finish(
        routes::page_routes().merge(signup_routes),
        app_state,
        &config.static_dir,
    );

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
