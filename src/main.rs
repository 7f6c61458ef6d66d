use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use restful_cars_api::{
    config::{Config, QueueBackend},
    constants::API_NAME,
    consumer::LogConsumer,
    create_app,
    queue::{LogQueue, MemoryQueue, RedisQueue},
    repository::PgCarRepository,
    service::{CarService, Notifier},
};
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("{} Starting Restful Cars API on port {}", API_NAME, config.server_port);

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("{} Connected to database", API_NAME);

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("{} Database migrations completed", API_NAME);

    let queue: Arc<dyn LogQueue> = match config.queue_backend {
        QueueBackend::Redis => Arc::new(
            RedisQueue::new(&config.redis_url)
                .await
                .context("Failed to connect to Redis")?,
        ),
        QueueBackend::Memory => Arc::new(MemoryQueue::new()),
    };

    tracing::info!("{} Using {:?} log queue", API_NAME, config.queue_backend);

    let notifier = Notifier::new(Arc::clone(&queue), &config.queue_exchange, &config.queue_name);

    if config.log_consumer_enabled {
        LogConsumer::spawn(Arc::clone(&queue), notifier.queue_key())
            .await
            .context("Failed to start log consumer")?;
    }

    let service = CarService::new(Arc::new(PgCarRepository::new(pool)), notifier);
    let app = create_app(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("{} Server listening on {}", API_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("{} Server stopped", API_NAME);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("{} Received Ctrl+C, shutting down", API_NAME);
        }
        _ = terminate => {
            tracing::info!("{} Received SIGTERM, shutting down", API_NAME);
        }
    }
}
