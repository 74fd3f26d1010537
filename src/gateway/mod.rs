//! Thin HTTP surface over the ledger core
//!
//! Routing stays mechanical: extract, delegate to a core service, wrap
//! the result in the `ApiResponse` envelope. All authenticated routes go
//! through the bearer-token middleware.

pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Json, Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use utoipa::OpenApi;

use crate::config::GatewayConfig;
use state::AppState;

fn build_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/users/{id}", get(handlers::get_user))
        .route(
            "/expenses",
            post(handlers::create_expense).get(handlers::list_expenses),
        )
        .route("/balance-sheet", get(handlers::balance_sheet))
        .route_layer(from_fn_with_state(state.clone(), middleware::bearer_auth));

    Router::new()
        .route("/users/register", post(handlers::register))
        .route("/users/login", post(handlers::login))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(openapi::ApiDoc::openapi()) }),
        )
        .merge(protected)
        .fallback(handlers::route_not_found)
        .with_state(state)
}

/// Bind and serve the gateway until the process is stopped.
pub async fn serve(state: Arc<AppState>, config: &GatewayConfig) -> anyhow::Result<()> {
    let app = build_router(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("gateway listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
