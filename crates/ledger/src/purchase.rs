use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use brewtab_core::{AccountId, PurchaseId};

/// Quantity recorded when a purchase is created without one.
pub const DEFAULT_QUANTITY: u32 = 1;

/// A debit event.
///
/// Immutable once recorded; the only lifecycle operations are create and
/// delete-by-id. `quantity × unit_price` is the magnitude subtracted
/// from the owning account's balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub account_id: AccountId,
    pub label: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Purchase {
    /// Record a new purchase. `quantity` defaults to 1 when omitted; an
    /// explicit 0 is kept as-is and contributes nothing.
    pub fn new(
        account_id: AccountId,
        label: impl Into<String>,
        quantity: Option<u32>,
        unit_price: Decimal,
    ) -> Self {
        Self {
            id: PurchaseId::new(),
            account_id,
            label: label.into(),
            quantity: quantity.unwrap_or(DEFAULT_QUANTITY),
            unit_price,
            created_at: Utc::now(),
        }
    }

    /// Debit magnitude this purchase contributes to the balance.
    pub fn total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn omitted_quantity_defaults_to_one() {
        let p = Purchase::new(AccountId::new(), "coffee", None, dec!(0.5));
        assert_eq!(p.quantity, 1);
        assert_eq!(p.total(), dec!(0.5));
    }

    #[test]
    fn explicit_quantity_multiplies_unit_price() {
        let p = Purchase::new(AccountId::new(), "coffee", Some(3), dec!(0.5));
        assert_eq!(p.total(), dec!(1.5));
    }

    #[test]
    fn explicit_zero_quantity_contributes_nothing() {
        let p = Purchase::new(AccountId::new(), "coffee", Some(0), dec!(0.5));
        assert_eq!(p.total(), Decimal::ZERO);
    }
}
