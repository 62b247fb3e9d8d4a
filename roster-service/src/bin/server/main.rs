use std::sync::Arc;
use std::time::Duration;

use auth::TokenIssuer;
use roster_service::config::Config;
use roster_service::domain::auth::service::AuthService;
use roster_service::domain::schedule::service::ScheduleService;
use roster_service::domain::user::service::UserService;
use roster_service::inbound::http::router::create_router;
use roster_service::inbound::http::router::AppState;
use roster_service::outbound::repositories::PostgresScheduleRepository;
use roster_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "roster-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        port = config.server.port,
        max_connections = config.database.max_connections,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.database.idle_timeout_secs))
        .connect(&config.database.url)
        .await?;
    tracing::info!(database = "postgresql", "Database connection pool created");

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_issuer = Arc::new(TokenIssuer::new(
        config.jwt.access_secret.as_bytes(),
        config.jwt.refresh_secret.as_bytes(),
        chrono::Duration::minutes(config.jwt.access_expiration_minutes),
        chrono::Duration::days(config.jwt.refresh_expiration_days),
    ));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let schedule_repository = Arc::new(PostgresScheduleRepository::new(pg_pool));

    let state = AppState {
        auth_service: Arc::new(AuthService::new(
            Arc::clone(&user_repository),
            Arc::clone(&token_issuer),
        )),
        user_service: Arc::new(UserService::new(Arc::clone(&user_repository))),
        schedule_service: Arc::new(ScheduleService::new(
            schedule_repository,
            Arc::clone(&user_repository),
        )),
        token_issuer,
    };

    let address = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, protocol = "http", "Http server listening");

    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
