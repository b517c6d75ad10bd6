//! Global configuration: readable by any active account, writable by
//! administrators.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use brewtab_auth::{require_active, require_admin};
use brewtab_store::ConfigStore;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::AccountContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_configs))
        .route("/:name", put(upsert_config))
}

/// GET /config — all configuration pairs.
pub async fn list_configs(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AccountContext>,
) -> axum::response::Response {
    if let Err(e) = require_active(ctx.account()) {
        return errors::auth_error_to_response(e);
    }

    match services.store().all() {
        Ok(entries) => {
            let items: Vec<serde_json::Value> = entries.iter().map(dto::config_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// PUT /config/:name — create or overwrite one pair.
pub async fn upsert_config(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AccountContext>,
    Path(name): Path<String>,
    Json(body): Json<dto::UpsertConfigRequest>,
) -> axum::response::Response {
    if let Err(e) = require_admin(ctx.account()) {
        return errors::auth_error_to_response(e);
    }

    match services.store().upsert(name, body.value) {
        Ok(entry) => (StatusCode::OK, Json(dto::config_to_json(&entry))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
