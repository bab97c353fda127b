use std::net::TcpListener;
use std::sync::Arc;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use health_tracker_backend::run;
use health_tracker_backend::auth::jwt::{JwtTokenVerifier, TokenVerifier};
use health_tracker_backend::config::settings::{get_config, get_jwt_settings, Settings, StoreBackend};
use health_tracker_backend::db::document_store::DocumentStore;
use health_tracker_backend::db::memory_store::InMemoryStore;
use health_tracker_backend::db::postgres_store::PostgresStore;
use health_tracker_backend::telemetry::{get_subscriber, init_subscriber};

async fn build_store(config: &Settings) -> std::io::Result<Arc<dyn DocumentStore>> {
    match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory document store, data is lost on restart");
            Ok(Arc::new(InMemoryStore::new()))
        }
        StoreBackend::Postgres => {
            // Only try to establish connection when actually used
            let connection_pool = PgPoolOptions::new()
                .max_connections(32)
                .acquire_timeout(Duration::from_secs(10))
                .idle_timeout(Duration::from_secs(600))
                .max_lifetime(Duration::from_secs(1800))
                .connect_lazy(config.database.connection_string().expose_secret())
                .map_err(std::io::Error::other)?;
            let store = PostgresStore::new(connection_pool);
            store.migrate().await.map_err(std::io::Error::other)?;
            tracing::info!("Document store migrations applied");
            Ok(Arc::new(store))
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = get_config().map_err(std::io::Error::other)?;

    let subscriber = get_subscriber(
        "health-tracker-backend".into(),
        config.application.effective_log_level(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let jwt_settings = get_jwt_settings(&config);
    let token_verifier: Arc<dyn TokenVerifier> = Arc::new(JwtTokenVerifier::new(&jwt_settings));
    let store = build_store(&config).await?;

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    run(
        listener,
        store,
        token_verifier,
        config.application.allowed_origins.clone()
    )?.await
}
