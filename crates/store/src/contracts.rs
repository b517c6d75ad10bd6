//! Storage contracts for accounts and configuration.
//!
//! The purchase/deposit log contracts live in `brewtab-ledger` (the
//! aggregator reads through them); the token contract lives in
//! `brewtab-auth`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use brewtab_auth::Account;
use brewtab_core::{AccountId, DomainResult};

/// Account registry contract.
pub trait AccountRegistry: Send + Sync {
    /// Insert a new account. `DuplicateEmail` when the email is taken.
    fn insert(&self, account: Account) -> DomainResult<()>;

    fn find_by_id(&self, id: AccountId) -> DomainResult<Option<Account>>;

    /// Login-path lookup; the aggregation core never calls this.
    fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>>;

    /// Every account, in creation order.
    fn list(&self) -> DomainResult<Vec<Account>>;

    /// Flip the activation flag; returns the updated account.
    /// `AccountNotFound` when absent. The only field update the system
    /// performs on an existing account.
    fn set_active(&self, id: AccountId, active: bool) -> DomainResult<Account>;

    /// Delete the account, cascading to both event logs and revoking its
    /// tokens. `AccountNotFound` when absent.
    fn delete(&self, id: AccountId) -> DomainResult<()>;
}

impl<R> AccountRegistry for std::sync::Arc<R>
where
    R: AccountRegistry + ?Sized,
{
    fn insert(&self, account: Account) -> DomainResult<()> {
        (**self).insert(account)
    }

    fn find_by_id(&self, id: AccountId) -> DomainResult<Option<Account>> {
        (**self).find_by_id(id)
    }

    fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        (**self).find_by_email(email)
    }

    fn list(&self) -> DomainResult<Vec<Account>> {
        (**self).list()
    }

    fn set_active(&self, id: AccountId, active: bool) -> DomainResult<Account> {
        (**self).set_active(id, active)
    }

    fn delete(&self, id: AccountId) -> DomainResult<()> {
        (**self).delete(id)
    }
}

/// One configuration pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntry {
    pub name: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Free-form name/value configuration table. Process-wide, read-mostly,
/// unrelated to the ledger invariants.
pub trait ConfigStore: Send + Sync {
    fn all(&self) -> DomainResult<Vec<ConfigEntry>>;

    fn get(&self, name: &str) -> DomainResult<Option<ConfigEntry>>;

    fn upsert(&self, name: String, value: String) -> DomainResult<ConfigEntry>;
}

impl<C> ConfigStore for std::sync::Arc<C>
where
    C: ConfigStore + ?Sized,
{
    fn all(&self) -> DomainResult<Vec<ConfigEntry>> {
        (**self).all()
    }

    fn get(&self, name: &str) -> DomainResult<Option<ConfigEntry>> {
        (**self).get(name)
    }

    fn upsert(&self, name: String, value: String) -> DomainResult<ConfigEntry> {
        (**self).upsert(name, value)
    }
}
