use std::{error::Error, net::SocketAddr};

use task_manager::{
    app_state::AppState, data_access::data_context::DataContext, map_routes, settings::Settings,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    // ── Boot ───────────────────────────────────────────────────
    let settings = Settings::load()?;
    let data_context = DataContext::new(&settings.database_path)?;
    let addr: SocketAddr = settings.socket_address().parse()?;

    // ── Router ─────────────────────────────────────────────────
    let app = map_routes(AppState::new(data_context, settings));

    // ── Start ──────────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "task manager listening");
    tracing::info!("  Tasks:  http://{addr}/api/tasks");
    tracing::info!("  Login:  POST http://{addr}/api/auth/login");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("task manager stopped");
    Ok(())
}

#[cfg(not(feature = "profile-console"))]
fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("task_manager=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(feature = "profile-console")]
fn init_tracing() {
    console_subscriber::init();
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "cannot listen for shutdown signal");
    }
}
