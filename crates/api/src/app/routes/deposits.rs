//! Deposit (credit event) recording and deletion.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::delete,
};

use brewtab_auth::require_active;
use brewtab_core::{AccountId, DepositId, DomainError};
use brewtab_ledger::{Deposit, DepositLog};
use brewtab_store::AccountRegistry;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::AccountContext;

pub fn router() -> Router {
    Router::new().route("/:id", delete(delete_deposit))
}

/// POST /accounts/:id/deposits — record a credit event.
pub async fn create_deposit(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AccountContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::CreateDepositRequest>,
) -> axum::response::Response {
    if let Err(e) = require_active(ctx.account()) {
        return errors::auth_error_to_response(e);
    }

    let account_id: AccountId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid account id");
        }
    };

    if let Err(e) = dto::validate_deposit(&body) {
        return errors::domain_error_to_response(e);
    }

    // Every event must reference an existing account.
    match services.store().find_by_id(account_id) {
        Ok(Some(_)) => {}
        Ok(None) => return errors::domain_error_to_response(DomainError::AccountNotFound),
        Err(e) => return errors::domain_error_to_response(e),
    }

    let deposit = Deposit::new(account_id, body.label, body.amount);
    let payload = dto::deposit_to_json(&deposit);

    if let Err(e) = DepositLog::create(&**services.store(), deposit) {
        return errors::domain_error_to_response(e);
    }

    (StatusCode::CREATED, Json(payload)).into_response()
}

/// DELETE /deposits/:id — hard-delete one credit event.
pub async fn delete_deposit(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DepositId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid deposit id");
        }
    };

    match DepositLog::delete_by_id(&**services.store(), id) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "id": id.to_string(), "deleted": true })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
