use std::sync::Arc;

use shift_ledger::api::{AppState, create_router};
use shift_ledger::config::ConfigLoader;
use shift_ledger::lifecycle::ShiftController;
use shift_ledger::store::MemoryStore;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_PATH: &str = "./config/ledger.yaml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path =
        std::env::var("SHIFT_LEDGER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = ConfigLoader::load(&config_path)?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.config().logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!(path = %config_path, "Configuration loaded");

    let store = MemoryStore::from_optional_path(config.config().storage.snapshot_path.as_deref())?;
    let ledger = ShiftController::new(Arc::new(store))
        .with_default_salary_rate(config.config().payroll.default_salary_rate);

    let addr = config.config().server.bind_address.clone();
    let app = create_router(AppState::new(config, ledger));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
