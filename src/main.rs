use anyhow::Context;
use dotenv::dotenv;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;

use sectrain_backend::{app, app_state::AppState, config::Config, db, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let telemetry_handles = telemetry::init_telemetry(None).await?;

    let config = Config::from_env().context("Failed to load configuration")?;

    let pool = db::init_pool(&config.database)
        .await
        .context("Failed to initialize database pool")?;

    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .context("Failed to migrate session store")?;
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.is_production())
        .with_expiry(Expiry::OnInactivity(time::Duration::days(
            config.auth.session_max_age_days,
        )));

    let addr = config.server_addr();
    let state = AppState::new(pool.clone(), config);
    let router = app::create_router(state, session_layer);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("{} listening on {}", env!("CARGO_PKG_NAME"), addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Failed to serve application")?;

    db::close_pool(&pool).await;
    telemetry_handles.shutdown().await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
