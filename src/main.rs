use inquiry_service::{
    api::{shutdown_signal, Server},
    config::Config,
    store::SqlTransactionLog,
};
use std::sync::Arc;
use tracing::info;

/// The main entry point for the inquiry service.
///
/// Loads configuration, initializes logging, opens the transaction log
/// connection pool and serves HTTP until Ctrl-C or SIGTERM, then closes the pool.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.logging.max_level()?)
        .init();
    info!("Inquiry service starting with config: {:?}", config);

    // The pool is built once and injected; request handlers never reach for globals.
    let store = SqlTransactionLog::connect(&config.database).await?;

    let server = Server::new(config.api.clone(), Arc::new(store.clone()));
    let served = server.start(shutdown_signal()).await;

    store.close().await;
    served
}
