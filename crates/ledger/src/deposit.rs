use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use brewtab_core::{AccountId, DepositId};

/// A credit event.
///
/// Immutable once recorded; create and delete-by-id only. `amount` is
/// validated strictly positive at the boundary before a deposit is ever
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub id: DepositId,
    pub account_id: AccountId,
    pub label: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Deposit {
    pub fn new(account_id: AccountId, label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: DepositId::new(),
            account_id,
            label: label.into(),
            amount,
            created_at: Utc::now(),
        }
    }
}
