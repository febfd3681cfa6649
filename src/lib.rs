pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod models;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Start the service: read configuration, run migrations, serve until
/// interrupted.
pub async fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let cfg = match config::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // Open once up front so migration failures stop the process before
    // it accepts traffic.
    if let Err(e) = db::open_database(&cfg.database_path) {
        tracing::error!("Database initialization failed: {e}");
        std::process::exit(1);
    }

    let signer = Arc::new(auth::TokenSigner::new(
        &cfg.token_secret,
        cfg.token_ttl_secs,
    ));
    let ctx = api::ApiContext::new(cfg.database_path.clone(), signer);

    let mut server = match api::start_server(ctx, cfg.bind_addr).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Server start failed: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(addr = %server.addr, "{} listening", config::APP_NAME);

    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {e}"),
    }
    server.shutdown();
}
