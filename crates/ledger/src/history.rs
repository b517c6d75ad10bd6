//! Unified transaction history.
//!
//! Purchases and deposits are projected into one tagged union so a
//! single stable sort can order them, with no field-presence checks.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use brewtab_core::{DepositId, PurchaseId};

use crate::deposit::Deposit;
use crate::purchase::Purchase;

/// One entry of an account's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TransactionView {
    Purchase {
        id: PurchaseId,
        label: String,
        quantity: u32,
        unit_price: Decimal,
        total: Decimal,
        created_at: DateTime<Utc>,
    },
    Deposit {
        id: DepositId,
        label: String,
        amount: Decimal,
        created_at: DateTime<Utc>,
    },
}

impl TransactionView {
    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            TransactionView::Purchase { created_at, .. }
            | TransactionView::Deposit { created_at, .. } => *created_at,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TransactionView::Purchase { label, .. } | TransactionView::Deposit { label, .. } => {
                label
            }
        }
    }

    /// Signed contribution to the balance (debits are negative).
    pub fn signed_amount(&self) -> Decimal {
        match self {
            TransactionView::Purchase { total, .. } => -*total,
            TransactionView::Deposit { amount, .. } => *amount,
        }
    }
}

impl From<Purchase> for TransactionView {
    fn from(p: Purchase) -> Self {
        let total = p.total();
        TransactionView::Purchase {
            id: p.id,
            label: p.label,
            quantity: p.quantity,
            unit_price: p.unit_price,
            total,
            created_at: p.created_at,
        }
    }
}

impl From<Deposit> for TransactionView {
    fn from(d: Deposit) -> Self {
        TransactionView::Deposit {
            id: d.id,
            label: d.label,
            amount: d.amount,
            created_at: d.created_at,
        }
    }
}

/// History of one account.
///
/// `Empty` is a distinct, success-shaped state the caller is expected to
/// surface ("no transactions yet") — not an error and not a bare empty
/// list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionHistory {
    Empty,
    Entries(Vec<TransactionView>),
}

impl TransactionHistory {
    pub fn len(&self) -> usize {
        match self {
            TransactionHistory::Empty => 0,
            TransactionHistory::Entries(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TransactionHistory::Empty)
    }
}
