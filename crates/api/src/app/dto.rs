use rust_decimal::Decimal;
use serde::Deserialize;

use brewtab_auth::Account;
use brewtab_core::DomainError;
use brewtab_ledger::{Deposit, Purchase, TransactionHistory, TransactionView};
use brewtab_store::ConfigEntry;

// -------------------------
// Request DTOs
// -------------------------

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 75;
pub const MAX_PASSWORD_LEN: usize = 75;
pub const MAX_LABEL_LEN: usize = 200;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePurchaseRequest {
    pub label: String,
    /// Omitted quantity records as 1; explicit 0 is kept.
    pub quantity: Option<u32>,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CreateDepositRequest {
    pub label: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpsertConfigRequest {
    pub value: String,
}

// -------------------------
// Field validation
// -------------------------

fn require_bounded(field: &'static str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    if value.len() > max {
        return Err(DomainError::validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

pub fn validate_register(req: &RegisterRequest) -> Result<(), DomainError> {
    require_bounded("last_name", &req.last_name, MAX_NAME_LEN)?;
    require_bounded("first_name", &req.first_name, MAX_NAME_LEN)?;
    require_bounded("email", &req.email, MAX_EMAIL_LEN)?;
    if !req.email.contains('@') {
        return Err(DomainError::validation("email is malformed"));
    }
    require_bounded("password", &req.password, MAX_PASSWORD_LEN)?;
    Ok(())
}

pub fn validate_purchase(req: &CreatePurchaseRequest) -> Result<(), DomainError> {
    require_bounded("label", &req.label, MAX_LABEL_LEN)?;
    if req.unit_price < Decimal::ZERO {
        return Err(DomainError::validation("unit_price must not be negative"));
    }
    Ok(())
}

pub fn validate_deposit(req: &CreateDepositRequest) -> Result<(), DomainError> {
    require_bounded("label", &req.label, MAX_LABEL_LEN)?;
    // A non-positive deposit would act as a silent debit; rejected.
    if req.amount <= Decimal::ZERO {
        return Err(DomainError::validation("amount must be positive"));
    }
    Ok(())
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn account_to_json(account: &Account) -> serde_json::Value {
    serde_json::json!({
        "id": account.id.to_string(),
        "last_name": account.last_name,
        "first_name": account.first_name,
        "email": account.email,
        "active": account.active,
        "admin": account.admin,
        "created_at": account.created_at.to_rfc3339(),
    })
}

pub fn account_with_balance_to_json(account: &Account, balance: Decimal) -> serde_json::Value {
    let mut value = account_to_json(account);
    value["balance"] = serde_json::Value::String(balance.to_string());
    value
}

pub fn purchase_to_json(purchase: &Purchase) -> serde_json::Value {
    serde_json::json!({
        "id": purchase.id.to_string(),
        "account_id": purchase.account_id.to_string(),
        "label": purchase.label,
        "quantity": purchase.quantity,
        "unit_price": purchase.unit_price.to_string(),
        "total": purchase.total().to_string(),
        "created_at": purchase.created_at.to_rfc3339(),
    })
}

pub fn deposit_to_json(deposit: &Deposit) -> serde_json::Value {
    serde_json::json!({
        "id": deposit.id.to_string(),
        "account_id": deposit.account_id.to_string(),
        "label": deposit.label,
        "amount": deposit.amount.to_string(),
        "created_at": deposit.created_at.to_rfc3339(),
    })
}

pub fn transaction_to_json(entry: &TransactionView) -> serde_json::Value {
    match entry {
        TransactionView::Purchase {
            id,
            label,
            quantity,
            unit_price,
            total,
            created_at,
        } => serde_json::json!({
            "kind": "purchase",
            "id": id.to_string(),
            "label": label,
            "quantity": quantity,
            "unit_price": unit_price.to_string(),
            "total": total.to_string(),
            "created_at": created_at.to_rfc3339(),
        }),
        TransactionView::Deposit {
            id,
            label,
            amount,
            created_at,
        } => serde_json::json!({
            "kind": "deposit",
            "id": id.to_string(),
            "label": label,
            "amount": amount.to_string(),
            "created_at": created_at.to_rfc3339(),
        }),
    }
}

/// History payload. The empty state is a distinct marker, not a silently
/// rendered empty list.
pub fn history_to_json(history: &TransactionHistory) -> serde_json::Value {
    match history {
        TransactionHistory::Empty => serde_json::json!({
            "status": "empty",
            "message": "no transactions yet",
            "transactions": [],
        }),
        TransactionHistory::Entries(entries) => serde_json::json!({
            "status": "ok",
            "count": entries.len(),
            "transactions": entries.iter().map(transaction_to_json).collect::<Vec<_>>(),
        }),
    }
}

pub fn config_to_json(entry: &ConfigEntry) -> serde_json::Value {
    serde_json::json!({
        "name": entry.name,
        "value": entry.value,
        "updated_at": entry.updated_at.to_rfc3339(),
    })
}
