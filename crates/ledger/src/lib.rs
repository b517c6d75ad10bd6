//! `brewtab-ledger` — balance computation and transaction-history
//! aggregation.
//!
//! The aggregator reads through collaborator contracts (account
//! directory plus the two event logs) and derives everything per
//! request; nothing here is cached or persisted.

pub mod aggregator;
pub mod deposit;
pub mod history;
pub mod purchase;

pub use aggregator::{AccountDirectory, DepositLog, LedgerAggregator, PurchaseLog};
pub use deposit::Deposit;
pub use history::{TransactionHistory, TransactionView};
pub use purchase::{DEFAULT_QUANTITY, Purchase};
