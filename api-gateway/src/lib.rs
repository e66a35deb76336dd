//! # Spend2Earn Gateway
//!
//! REST and WebSocket surface over the Spend2Earn engine:
//! - `/accounts/:address/*`: spend, deposit, borrow, repay, activity
//! - `/ai`, `/credit`, `/portfolio`, `/yield`: dashboard mock data
//! - `/routing/quote`, `/transfers`, automation: simulated protocol adapters
//! - `/ws`: live activity feed

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::http::Method;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::{GatewayConfig, StoreBackend};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Build the application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    routes::routes()
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
