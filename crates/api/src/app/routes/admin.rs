//! Admin routes for account administration.
//!
//! Every handler here requires the admin flag. Deliberately NOT the
//! active flag: deactivation removes derived-data access, not admin
//! rights.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use brewtab_auth::require_admin;
use brewtab_core::AccountId;
use brewtab_store::AccountRegistry;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::AccountContext;

pub fn router() -> Router {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts/:id/active", post(set_active))
        .route("/accounts/:id", axum::routing::delete(delete_account))
}

/// GET /admin/accounts — every account with its computed balance.
pub async fn list_accounts(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AccountContext>,
) -> axum::response::Response {
    if let Err(e) = require_admin(ctx.account()) {
        return errors::auth_error_to_response(e);
    }

    let accounts = match services.store().list() {
        Ok(a) => a,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let mut items = Vec::with_capacity(accounts.len());
    for account in &accounts {
        let balance = match services.aggregator().balance(account.id) {
            Ok(b) => b,
            Err(e) => return errors::domain_error_to_response(e),
        };
        items.push(dto::account_with_balance_to_json(account, balance));
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({ "items": items })),
    )
        .into_response()
}

/// POST /admin/accounts/:id/active — set the activation flag.
pub async fn set_active(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AccountContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::SetActiveRequest>,
) -> axum::response::Response {
    if let Err(e) = require_admin(ctx.account()) {
        return errors::auth_error_to_response(e);
    }

    let id: AccountId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid account id");
        }
    };

    match services.store().set_active(id, body.active) {
        Ok(account) => {
            tracing::info!(account_id = %id, active = account.active, "activation flag updated");
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "id": account.id.to_string(),
                    "active": account.active,
                })),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// DELETE /admin/accounts/:id — delete an account; cascades to both
/// event logs and revokes its tokens.
pub async fn delete_account(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AccountContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = require_admin(ctx.account()) {
        return errors::auth_error_to_response(e);
    }

    let id: AccountId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid account id");
        }
    };

    match services.store().delete(id) {
        Ok(()) => {
            tracing::info!(account_id = %id, "account deleted");
            (
                StatusCode::OK,
                Json(serde_json::json!({ "id": id.to_string(), "deleted": true })),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
