use axum::{
    Router,
    routing::{get, post},
};

pub mod accounts;
pub mod admin;
pub mod config;
pub mod deposits;
pub mod purchases;
pub mod system;

/// Router for endpoints reachable without a token.
pub fn public_router() -> Router {
    Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
}

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/accounts", accounts::router())
        .nest("/purchases", purchases::router())
        .nest("/deposits", deposits::router())
        .nest("/config", config::router())
        .nest("/admin", admin::router())
}
