//! HTTP API application wiring (axum router + service wiring).
//!
//! Folder layout:
//! - `services.rs`: store/aggregator/gate wiring
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs, field validation, JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use brewtab_auth::Gate;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (used by `main.rs` and the black-box
/// tests, which seed the services before passing them in).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    let gate = Arc::new(Gate::new(
        services.token_service(),
        services.account_source(),
    ));
    let auth_state = middleware::AuthState { gate };

    // Protected routes: require a resolvable bearer token.
    let protected = routes::router()
        .layer(Extension(Arc::clone(&services)))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::public_router().layer(Extension(services)))
        .merge(protected)
        .layer(ServiceBuilder::new())
}
