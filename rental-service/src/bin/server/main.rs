use std::sync::Arc;
use std::time::Duration;

use auth::AuthorizationGate;
use auth::TokenIssuer;
use rental_service::car::service::CarService;
use rental_service::config::Config;
use rental_service::domain::identity::service::IdentityService;
use rental_service::domain::rental::service::RentalService;
use rental_service::inbound::http::router::create_router;
use rental_service::inbound::http::router::AppState;
use rental_service::outbound::repositories::PostgresCarRepository;
use rental_service::outbound::repositories::PostgresIdentityRepository;
use rental_service::outbound::repositories::PostgresRentalRepository;
use rental_service::outbound::repositories::PostgresRoleRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rental_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "rental-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        query_timeout_secs = config.database.query_timeout_secs,
        jwt_expiration_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_issuer = TokenIssuer::new(
        config.jwt.secret.as_bytes(),
        chrono::Duration::hours(config.jwt.expiration_hours),
    );
    let gate = Arc::new(AuthorizationGate::new(token_issuer.clone()));

    let query_timeout = Duration::from_secs(config.database.query_timeout_secs);

    let identity_repository = Arc::new(PostgresIdentityRepository::new(pg_pool.clone()));
    let role_repository = Arc::new(PostgresRoleRepository::new(pg_pool.clone()));
    let car_repository = Arc::new(PostgresCarRepository::new(pg_pool.clone()));
    let rental_repository = Arc::new(PostgresRentalRepository::new(pg_pool));

    let state = AppState {
        identity_service: Arc::new(IdentityService::new(
            identity_repository,
            role_repository,
            token_issuer,
            query_timeout,
        )),
        car_service: Arc::new(CarService::new(Arc::clone(&car_repository), query_timeout)),
        rental_service: Arc::new(RentalService::new(
            car_repository,
            rental_repository,
            query_timeout,
        )),
        gate,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(state);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
