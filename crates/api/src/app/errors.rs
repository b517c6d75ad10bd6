use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use brewtab_auth::AuthError;
use brewtab_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::DuplicateEmail => json_error(
            StatusCode::CONFLICT,
            "duplicate_email",
            "email address already registered",
        ),
        DomainError::InvalidToken => json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_token",
            "invalid or expired token",
        ),
        DomainError::BadCredential => json_error(
            StatusCode::UNAUTHORIZED,
            "bad_credential",
            "password does not match",
        ),
        DomainError::AccountDisabled => json_error(
            StatusCode::FORBIDDEN,
            "account_disabled",
            "account is deactivated",
        ),
        DomainError::NotAuthorized => json_error(
            StatusCode::FORBIDDEN,
            "not_authorized",
            "administrator access required",
        ),
        DomainError::AccountNotFound => {
            json_error(StatusCode::NOT_FOUND, "account_not_found", "account not found")
        }
        DomainError::RecordNotFound => {
            json_error(StatusCode::NOT_FOUND, "not_found", "record not found")
        }
        DomainError::Store(msg) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg),
    }
}

pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::InvalidToken => json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_token",
            "invalid or expired token",
        ),
        AuthError::AccountDisabled => json_error(
            StatusCode::FORBIDDEN,
            "account_disabled",
            "account is deactivated",
        ),
        AuthError::NotAuthorized => json_error(
            StatusCode::FORBIDDEN,
            "not_authorized",
            "administrator access required",
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
