mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use shelfscan_engine::{Engine, EngineConfig};

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = shelfscan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let catalog_file = shelfscan_core::load_catalog(&config.catalog_path)?;
    let (catalog, pricing) = shelfscan_engine::seed::from_catalog_file(catalog_file);
    let engine = Arc::new(Engine::new(
        Arc::new(catalog),
        Arc::new(pricing),
        EngineConfig::from_app_config(&config),
    ));

    let stats = engine.rebuild_index().await?;
    tracing::info!(
        products = stats.products,
        aliases = stats.aliases,
        brands = stats.brands,
        catalog = %config.catalog_path.display(),
        "catalog indexed"
    );

    let app = build_app(AppState { engine });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
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
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
