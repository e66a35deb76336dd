//! Spend2Earn API Gateway
//!
//! Serves account, dashboard and integration endpoints, and runs the vault
//! yield ticker when `SPEND2EARN_YIELD_TICK_SECS` is set.

use std::sync::Arc;
use std::time::Duration;

use spend2earn_engine::{AccountService, AccountStore, InMemoryStore, JsonFileStore};
use spend2earn_gateway::{app, AppState, GatewayConfig, StoreBackend};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_gateway=info".parse()?)
                .add_directive("spend2earn_gateway=info".parse()?)
                .add_directive("spend2earn_engine=info".parse()?),
        )
        .json()
        .init();

    let config = GatewayConfig::load()?;
    info!(?config, "Loaded configuration");

    let store: Arc<dyn AccountStore> = match config.store {
        StoreBackend::Memory => Arc::new(InMemoryStore::new()),
        StoreBackend::File => {
            let store = JsonFileStore::open(&config.store_path).await?;
            info!(path = %store.path().display(), "Using file account store");
            Arc::new(store)
        }
    };

    let service = Arc::new(AccountService::new(store, config.service_config()));
    let state = AppState::new(Arc::clone(&service), &config);

    if config.yield_tick_secs > 0 {
        tokio::spawn(run_yield_ticker(
            service,
            Duration::from_secs(config.yield_tick_secs),
        ));
    }

    let addr = config.socket_addr()?;
    info!("Spend2Earn API Gateway starting on {}", addr);
    info!(
        "Endpoints: /health, /accounts, /ai, /credit, /portfolio, /yield, /routing, /transfers, /ws"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn run_yield_ticker(service: Arc<AccountService>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    // First tick fires immediately
    interval.tick().await;

    loop {
        interval.tick().await;
        let accrued = service.accrue_all().await;
        if accrued > 0 {
            info!(accrued, "Vault yield accrued");
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}
