//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, database connections, service wiring, and the
//! Axum server lifecycle.

use crate::application::services::{AuthService, LinkService, LinkSettings};
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::{LinkRepository, TokenRepository};
use crate::infrastructure::persistence::{MemoryStore, PgLinkRepository, PgTokenRepository};
use crate::infrastructure::url_checker::{HttpUrlChecker, NoopUrlChecker, UrlChecker};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Connection attempts made before startup gives up on the database.
const DB_CONNECT_ATTEMPTS: usize = 5;

/// Opens the PostgreSQL pool, retrying with exponential backoff.
///
/// # Errors
///
/// Returns the last connection error once every attempt has failed.
pub async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    // 200ms, 400ms, 800ms, ...
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(DB_CONNECT_ATTEMPTS - 1);

    Retry::start(strategy, || {
        let options = options.clone();
        async move {
            options.connect(database_url).await.inspect_err(|e| {
                tracing::warn!(error = %e, "Database connection attempt failed");
            })
        }
    })
    .await
    .context("Failed to connect to database")
}

/// Repositories backing the services.
struct Storage {
    links: Arc<dyn LinkRepository>,
    tokens: Arc<dyn TokenRepository>,
}

async fn open_storage(config: &Config) -> Result<Storage> {
    match (config.storage_backend, config.database_url.as_deref()) {
        (StorageBackend::Postgres, Some(database_url)) => {
            let pool = connect_pool(config, database_url).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");

            let pool = Arc::new(pool);
            Ok(Storage {
                links: Arc::new(PgLinkRepository::new(pool.clone())),
                tokens: Arc::new(PgTokenRepository::new(pool)),
            })
        }
        (StorageBackend::Postgres, None) => {
            anyhow::bail!("DATABASE_URL is required with STORAGE_BACKEND=postgres")
        }
        (StorageBackend::Memory, _) => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            let store = Arc::new(MemoryStore::new());
            Ok(Storage {
                links: store.clone(),
                tokens: store,
            })
        }
    }
}

/// Builds the URL checker selected by `VALIDATE_ORIGINAL_URL`.
fn url_checker(config: &Config) -> Result<Arc<dyn UrlChecker>> {
    if config.validate_original_url {
        let checker = HttpUrlChecker::new(Duration::from_secs(config.url_check_timeout_secs))
            .context("Failed to build HTTP client for URL validation")?;
        Ok(Arc::new(checker))
    } else {
        Ok(Arc::new(NoopUrlChecker))
    }
}

/// Builds application state from configuration.
///
/// # Errors
///
/// Returns an error if storage cannot be opened or migrated.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let storage = open_storage(config).await?;

    let link_service = LinkService::new(
        storage.links,
        url_checker(config)?,
        LinkSettings {
            default_expiry_days: config.default_expiry_days,
            validate_original_url: config.validate_original_url,
            max_key_attempts: config.max_key_attempts,
        },
    );
    let auth_service = AuthService::new(storage.tokens, config.token_signing_secret.clone());

    Ok(AppState::new(
        Arc::new(link_service),
        Arc::new(auth_service),
        config.base_url.clone(),
        config.page_size,
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (PostgreSQL pool plus migrations, or in-memory)
/// - Link and authentication services
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
