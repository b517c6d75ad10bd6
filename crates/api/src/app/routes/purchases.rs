//! Purchase (debit event) recording and deletion.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::delete,
};

use brewtab_auth::require_active;
use brewtab_core::{AccountId, DomainError, PurchaseId};
use brewtab_ledger::{Purchase, PurchaseLog};
use brewtab_store::AccountRegistry;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::AccountContext;

pub fn router() -> Router {
    Router::new().route("/:id", delete(delete_purchase))
}

/// POST /accounts/:id/purchases — record a debit event.
pub async fn create_purchase(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AccountContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::CreatePurchaseRequest>,
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

    if let Err(e) = dto::validate_purchase(&body) {
        return errors::domain_error_to_response(e);
    }

    // Every event must reference an existing account.
    match services.store().find_by_id(account_id) {
        Ok(Some(_)) => {}
        Ok(None) => return errors::domain_error_to_response(DomainError::AccountNotFound),
        Err(e) => return errors::domain_error_to_response(e),
    }

    let purchase = Purchase::new(account_id, body.label, body.quantity, body.unit_price);
    let payload = dto::purchase_to_json(&purchase);

    if let Err(e) = PurchaseLog::create(&**services.store(), purchase) {
        return errors::domain_error_to_response(e);
    }

    (StatusCode::CREATED, Json(payload)).into_response()
}

/// DELETE /purchases/:id — hard-delete one debit event.
pub async fn delete_purchase(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: PurchaseId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid purchase id");
        }
    };

    match PurchaseLog::delete_by_id(&**services.store(), id) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "id": id.to_string(), "deleted": true })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
