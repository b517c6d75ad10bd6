//! `brewtab-core` — shared identifiers and the domain error model.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{AccountId, DepositId, PurchaseId};
