//! In-memory persistence (dev/test).
//!
//! Every table sits behind its own `RwLock`; each insert is atomic and
//! ids/timestamps are assigned at record construction. No isolation is
//! provided across tables — the aggregator's two log reads are separate
//! lock acquisitions, which is the documented relaxation.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use brewtab_auth::{Account, AccountSource, TokenService, token};
use brewtab_core::{AccountId, DepositId, DomainError, DomainResult, PurchaseId};
use brewtab_ledger::{AccountDirectory, Deposit, DepositLog, Purchase, PurchaseLog};

use crate::contracts::{AccountRegistry, ConfigEntry, ConfigStore};

/// All tables of the in-memory backend.
///
/// Purchases and deposits are kept in insertion order; the stable
/// tie-break in history assembly depends on `find_by_account` preserving
/// it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
    purchases: RwLock<Vec<Purchase>>,
    deposits: RwLock<Vec<Deposit>>,
    configs: RwLock<BTreeMap<String, ConfigEntry>>,
    tokens: RwLock<HashMap<String, AccountId>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn read<T>(lock: &RwLock<T>) -> DomainResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| DomainError::store("store lock poisoned"))
}

fn write<T>(lock: &RwLock<T>) -> DomainResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| DomainError::store("store lock poisoned"))
}

impl AccountRegistry for MemoryStore {
    fn insert(&self, account: Account) -> DomainResult<()> {
        let mut accounts = write(&self.accounts)?;

        if accounts
            .values()
            .any(|a| a.email.eq_ignore_ascii_case(&account.email))
        {
            return Err(DomainError::DuplicateEmail);
        }

        accounts.insert(account.id, account);
        Ok(())
    }

    fn find_by_id(&self, id: AccountId) -> DomainResult<Option<Account>> {
        Ok(read(&self.accounts)?.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        Ok(read(&self.accounts)?
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn list(&self) -> DomainResult<Vec<Account>> {
        let mut accounts: Vec<Account> = read(&self.accounts)?.values().cloned().collect();
        accounts.sort_by_key(|a| a.created_at);
        Ok(accounts)
    }

    fn set_active(&self, id: AccountId, active: bool) -> DomainResult<Account> {
        let mut accounts = write(&self.accounts)?;
        let account = accounts.get_mut(&id).ok_or(DomainError::AccountNotFound)?;
        account.active = active;
        Ok(account.clone())
    }

    fn delete(&self, id: AccountId) -> DomainResult<()> {
        let removed = write(&self.accounts)?.remove(&id);
        if removed.is_none() {
            return Err(DomainError::AccountNotFound);
        }

        // Cascade: the account's events and tokens must not survive it.
        write(&self.purchases)?.retain(|p| p.account_id != id);
        write(&self.deposits)?.retain(|d| d.account_id != id);
        self.revoke_account(id);

        Ok(())
    }
}

impl AccountSource for MemoryStore {
    fn find(&self, id: AccountId) -> Option<Account> {
        self.accounts.read().ok()?.get(&id).cloned()
    }
}

impl AccountDirectory for MemoryStore {
    fn exists(&self, account_id: AccountId) -> DomainResult<bool> {
        Ok(read(&self.accounts)?.contains_key(&account_id))
    }
}

impl TokenService for MemoryStore {
    fn issue(&self, account_id: AccountId) -> String {
        let minted = token::mint();
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.insert(minted.clone(), account_id);
        }
        minted
    }

    fn resolve(&self, presented: &str) -> Option<AccountId> {
        self.tokens.read().ok()?.get(presented).copied()
    }

    fn revoke_account(&self, account_id: AccountId) {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.retain(|_, id| *id != account_id);
        }
    }
}

impl PurchaseLog for MemoryStore {
    fn create(&self, purchase: Purchase) -> DomainResult<()> {
        write(&self.purchases)?.push(purchase);
        Ok(())
    }

    fn find_by_account(&self, account_id: AccountId) -> DomainResult<Vec<Purchase>> {
        Ok(read(&self.purchases)?
            .iter()
            .filter(|p| p.account_id == account_id)
            .cloned()
            .collect())
    }

    fn delete_by_id(&self, id: PurchaseId) -> DomainResult<()> {
        let mut purchases = write(&self.purchases)?;
        let before = purchases.len();
        purchases.retain(|p| p.id != id);
        if purchases.len() == before {
            return Err(DomainError::RecordNotFound);
        }
        Ok(())
    }
}

impl DepositLog for MemoryStore {
    fn create(&self, deposit: Deposit) -> DomainResult<()> {
        write(&self.deposits)?.push(deposit);
        Ok(())
    }

    fn find_by_account(&self, account_id: AccountId) -> DomainResult<Vec<Deposit>> {
        Ok(read(&self.deposits)?
            .iter()
            .filter(|d| d.account_id == account_id)
            .cloned()
            .collect())
    }

    fn delete_by_id(&self, id: DepositId) -> DomainResult<()> {
        let mut deposits = write(&self.deposits)?;
        let before = deposits.len();
        deposits.retain(|d| d.id != id);
        if deposits.len() == before {
            return Err(DomainError::RecordNotFound);
        }
        Ok(())
    }
}

impl ConfigStore for MemoryStore {
    fn all(&self) -> DomainResult<Vec<ConfigEntry>> {
        Ok(read(&self.configs)?.values().cloned().collect())
    }

    fn get(&self, name: &str) -> DomainResult<Option<ConfigEntry>> {
        Ok(read(&self.configs)?.get(name).cloned())
    }

    fn upsert(&self, name: String, value: String) -> DomainResult<ConfigEntry> {
        let entry = ConfigEntry {
            name: name.clone(),
            value,
            updated_at: Utc::now(),
        };
        write(&self.configs)?.insert(name, entry.clone());
        Ok(entry)
    }
}
