use std::sync::Arc;

use account_service::config::Config;
use account_service::config::JwtConfig;
use account_service::domain::user::ports::UserRepository;
use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryUserRepository;
use account_service::outbound::repositories::PostgresUserRepository;
use account_service::outbound::user_store::RepositoryUserStore;
use auth::Authenticator;
use auth::JwtHandler;
use auth::SystemClock;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        database = config.database.url.is_some(),
        jwt_algorithm = ?config.jwt.algorithm,
        access_token_expire_minutes = config.jwt.access_token_expire_minutes,
        "Configuration loaded"
    );

    if config.jwt.secret.len() < JwtConfig::RECOMMENDED_SECRET_BYTES {
        tracing::warn!(
            secret_bytes = config.jwt.secret.len(),
            "JWT secret is shorter than recommended"
        );
    }

    match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            serve(Arc::new(PostgresUserRepository::new(pg_pool)), &config).await
        }
        None => {
            tracing::warn!("No database configured, accounts are kept in memory");
            serve(Arc::new(InMemoryUserRepository::new()), &config).await
        }
    }
}

async fn serve<R>(user_repository: Arc<R>, config: &Config) -> Result<(), anyhow::Error>
where
    R: UserRepository,
{
    let jwt_handler =
        JwtHandler::with_algorithm(config.jwt.secret.as_bytes(), config.jwt.algorithm)?;
    let authenticator = Arc::new(Authenticator::from_parts(
        jwt_handler,
        Arc::new(RepositoryUserStore::new(Arc::clone(&user_repository))),
        SystemClock,
    ));
    let user_service = Arc::new(UserService::new(user_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        authenticator,
        config.jwt.access_token_ttl(),
    );
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");
    Ok(())
}
