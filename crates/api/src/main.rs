use std::net::SocketAddr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use waffle_api::background::daily_refresh;
use waffle_api::config::ServerConfig;
use waffle_api::router::build_app_router;
use waffle_api::services::acquisition::Acquisition;
use waffle_api::state::AppState;
use waffle_db::{MemoryBoardStore, PgBoardStore, SharedStore};
use waffle_source::{DosukuApi, PuzzleSource};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Store ---
    let store = connect_store(&config).await;

    // --- Puzzle source ---
    let api: Arc<dyn PuzzleSource> = Arc::new(
        DosukuApi::new(config.source.api_url.clone(), config.source.request_timeout())
            .expect("Failed to build puzzle source HTTP client"),
    );
    let on_demand_policy = config.on_demand_policy();
    let daily_policy = config.source.retry_policy();
    tracing::info!(
        api_url = %config.source.api_url,
        backoff_secs = daily_policy.backoff.as_secs(),
        max_attempts = ?daily_policy.max_attempts,
        daily_deadline_secs = ?daily_policy.deadline.map(|d| d.as_secs()),
        on_demand_deadline_secs = ?on_demand_policy.deadline.map(|d| d.as_secs()),
        "Puzzle source configured"
    );
    let acquisition = Arc::new(Acquisition::from_config(Arc::clone(&store), api, &config));

    // --- Daily refresh ---
    let refresh_cancel = CancellationToken::new();
    let refresh_handle = if config.daily.enabled {
        let handle = tokio::spawn(daily_refresh::run(
            Arc::clone(&acquisition),
            config.daily.run_on_startup,
            refresh_cancel.clone(),
        ));
        Some(handle)
    } else {
        tracing::info!("Daily refresh disabled");
        None
    };

    // --- App state ---
    let state = AppState {
        store,
        acquisition,
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    refresh_cancel.cancel();
    if let Some(handle) = refresh_handle {
        if tokio::time::timeout(config.shutdown_timeout(), handle)
            .await
            .is_err()
        {
            tracing::warn!("Daily refresh did not stop within the shutdown timeout");
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// Install the global subscriber. `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "waffle_api=debug,waffle_source=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// PostgreSQL when `DATABASE_URL` is set, otherwise the in-memory store.
async fn connect_store(config: &ServerConfig) -> SharedStore {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, boards are kept in memory and lost on restart");
        return Arc::new(MemoryBoardStore::new());
    };

    let pool = waffle_db::create_pool(database_url, config.database_max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    waffle_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    waffle_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    Arc::new(PgBoardStore::new(pool))
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
