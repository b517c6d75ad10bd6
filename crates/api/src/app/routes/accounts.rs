//! Account registration, login, and the derived-data reads.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use brewtab_auth::{Account, TokenService, authenticate, password, require_active};
use brewtab_core::{AccountId, DomainError};
use brewtab_store::AccountRegistry;

use crate::app::routes::{deposits, purchases};
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::AccountContext;

pub fn router() -> Router {
    Router::new()
        .route("/:id", get(get_account))
        .route("/:id/balance", get(get_balance))
        .route("/:id/history", get(get_history))
        .route("/:id/purchases", post(purchases::create_purchase))
        .route("/:id/deposits", post(deposits::create_deposit))
}

/// POST /register — create an account (public).
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    if let Err(e) = dto::validate_register(&body) {
        return errors::domain_error_to_response(e);
    }

    let password_hash = match password::hash(&body.password) {
        Ok(h) => h,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let account = Account::new(body.last_name, body.first_name, body.email, password_hash);
    let id = account.id;

    if let Err(e) = services.store().insert(account) {
        return errors::domain_error_to_response(e);
    }

    tracing::info!(account_id = %id, "account registered");

    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": id.to_string() })),
    )
        .into_response()
}

/// POST /login — verify credentials and issue a bearer token (public).
///
/// Unknown email and wrong password are reported distinctly; a disabled
/// account is denied before the credential comparison runs.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let account = match services.store().find_by_email(&body.email) {
        Ok(Some(a)) => a,
        Ok(None) => return errors::domain_error_to_response(DomainError::AccountNotFound),
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = authenticate(&account, &body.password) {
        return errors::domain_error_to_response(e);
    }

    let token = services.token_service().issue(account.id);

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "token": token,
            "account": dto::account_to_json(&account),
        })),
    )
        .into_response()
}

/// GET /accounts/:id — account fields (no credential material).
pub async fn get_account(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AccountContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = require_active(ctx.account()) {
        return errors::auth_error_to_response(e);
    }

    let id: AccountId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid account id");
        }
    };

    match services.store().find_by_id(id) {
        Ok(Some(account)) => (StatusCode::OK, Json(dto::account_to_json(&account))).into_response(),
        Ok(None) => errors::domain_error_to_response(DomainError::AccountNotFound),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// GET /accounts/:id/balance — derived signed balance.
pub async fn get_balance(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AccountContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = require_active(ctx.account()) {
        return errors::auth_error_to_response(e);
    }

    let id: AccountId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid account id");
        }
    };

    match services.aggregator().balance(id) {
        Ok(balance) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "account_id": id.to_string(),
                "balance": balance.to_string(),
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// GET /accounts/:id/history — unified transaction history, most recent
/// first, with a distinct marker when there are no transactions yet.
pub async fn get_history(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AccountContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = require_active(ctx.account()) {
        return errors::auth_error_to_response(e);
    }

    let id: AccountId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid account id");
        }
    };

    match services.aggregator().history(id) {
        Ok(history) => (StatusCode::OK, Json(dto::history_to_json(&history))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
