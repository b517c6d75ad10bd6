use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::context::AccountContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// GET /whoami — the resolved acting account behind the token.
pub async fn whoami(Extension(ctx): Extension<AccountContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "account_id": ctx.account_id().to_string(),
        "email": ctx.account().email,
        "active": ctx.account().active,
        "admin": ctx.account().admin,
    }))
}
