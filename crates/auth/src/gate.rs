//! The authorization gate.
//!
//! Every protected operation goes through one gate object instead of
//! ad-hoc per-endpoint boolean checks: resolve the acting account from a
//! bearer token, then apply the state checks the operation requires.
//!
//! Admin and active are independent axes. A deactivated administrator
//! keeps admin rights through a still-valid token but loses access to
//! derived data. Tokens are not revoked on state changes; each request
//! re-reads the account, so the checks always see current state.

use thiserror::Error;

use brewtab_core::{AccountId, DomainError};

use crate::account::Account;
use crate::password;
use crate::token::TokenService;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid or expired token")]
    InvalidToken,

    #[error("account is deactivated")]
    AccountDisabled,

    #[error("not authorized")]
    NotAuthorized,
}

/// Read-side account lookup the gate resolves through.
pub trait AccountSource: Send + Sync {
    fn find(&self, id: AccountId) -> Option<Account>;
}

impl<S> AccountSource for std::sync::Arc<S>
where
    S: AccountSource + ?Sized,
{
    fn find(&self, id: AccountId) -> Option<Account> {
        (**self).find(id)
    }
}

/// Token-to-account resolution, wired to the token and account
/// collaborators.
pub struct Gate<T, S> {
    tokens: T,
    accounts: S,
}

impl<T, S> Gate<T, S>
where
    T: TokenService,
    S: AccountSource,
{
    pub fn new(tokens: T, accounts: S) -> Self {
        Self { tokens, accounts }
    }

    /// Resolve the acting account behind a bearer token.
    ///
    /// A token whose account no longer exists must not authenticate
    /// either; both cases collapse into `InvalidToken`.
    pub fn resolve_account(&self, token: &str) -> Result<Account, AuthError> {
        let id = self.tokens.resolve(token).ok_or(AuthError::InvalidToken)?;
        self.accounts.find(id).ok_or(AuthError::InvalidToken)
    }
}

/// Deny deactivated accounts. Applied to every read of derived data.
pub fn require_active(account: &Account) -> Result<(), AuthError> {
    if account.active {
        Ok(())
    } else {
        Err(AuthError::AccountDisabled)
    }
}

/// Deny non-administrators.
pub fn require_admin(account: &Account) -> Result<(), AuthError> {
    if account.admin {
        Ok(())
    } else {
        Err(AuthError::NotAuthorized)
    }
}

/// Login credential check.
///
/// Disabled accounts are denied before the credential comparison runs.
pub fn authenticate(account: &Account, presented: &str) -> Result<(), DomainError> {
    if !account.active {
        return Err(DomainError::AccountDisabled);
    }

    if !password::verify(presented, &account.password_hash) {
        return Err(DomainError::BadCredential);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::token;

    struct FakeAuthStore {
        tokens: Mutex<HashMap<String, AccountId>>,
        accounts: Mutex<HashMap<AccountId, Account>>,
    }

    impl FakeAuthStore {
        fn new() -> Self {
            Self {
                tokens: Mutex::new(HashMap::new()),
                accounts: Mutex::new(HashMap::new()),
            }
        }

        fn add_account(&self, account: Account) {
            self.accounts.lock().unwrap().insert(account.id, account);
        }

        fn remove_account(&self, id: AccountId) {
            self.accounts.lock().unwrap().remove(&id);
        }
    }

    impl TokenService for FakeAuthStore {
        fn issue(&self, account_id: AccountId) -> String {
            let minted = token::mint();
            self.tokens.lock().unwrap().insert(minted.clone(), account_id);
            minted
        }

        fn resolve(&self, token: &str) -> Option<AccountId> {
            self.tokens.lock().unwrap().get(token).copied()
        }

        fn revoke_account(&self, account_id: AccountId) {
            self.tokens.lock().unwrap().retain(|_, id| *id != account_id);
        }
    }

    impl AccountSource for FakeAuthStore {
        fn find(&self, id: AccountId) -> Option<Account> {
            self.accounts.lock().unwrap().get(&id).cloned()
        }
    }

    fn account() -> Account {
        Account::new("Doe", "Jo", "jo@example.com", password::hash("pw").unwrap())
    }

    #[test]
    fn resolves_account_for_issued_token() {
        let store = Arc::new(FakeAuthStore::new());
        let acct = account();
        let id = acct.id;
        store.add_account(acct);

        let gate = Gate::new(Arc::clone(&store), Arc::clone(&store));
        let token = store.issue(id);

        let resolved = gate.resolve_account(&token).expect("should resolve");
        assert_eq!(resolved.id, id);
    }

    #[test]
    fn unknown_token_is_invalid() {
        let store = Arc::new(FakeAuthStore::new());
        let gate = Gate::new(Arc::clone(&store), Arc::clone(&store));

        assert_eq!(gate.resolve_account("nope"), Err(AuthError::InvalidToken));
    }

    #[test]
    fn token_for_deleted_account_is_invalid() {
        let store = Arc::new(FakeAuthStore::new());
        let acct = account();
        let id = acct.id;
        store.add_account(acct);

        let gate = Gate::new(Arc::clone(&store), Arc::clone(&store));
        let token = store.issue(id);
        store.remove_account(id);

        assert_eq!(gate.resolve_account(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn active_and_admin_are_independent_axes() {
        let mut acct = account();
        acct.admin = true;
        acct.active = false;

        // Deactivation blocks derived-data access but not admin rights.
        assert_eq!(require_active(&acct), Err(AuthError::AccountDisabled));
        assert_eq!(require_admin(&acct), Ok(()));

        acct.active = true;
        acct.admin = false;
        assert_eq!(require_active(&acct), Ok(()));
        assert_eq!(require_admin(&acct), Err(AuthError::NotAuthorized));
    }

    #[test]
    fn authenticate_denies_disabled_before_checking_credentials() {
        let mut acct = account();
        acct.active = false;

        // Even the correct password is rejected with the disabled error.
        assert_eq!(authenticate(&acct, "pw"), Err(DomainError::AccountDisabled));
        assert_eq!(
            authenticate(&acct, "wrong"),
            Err(DomainError::AccountDisabled)
        );
    }

    #[test]
    fn authenticate_rejects_wrong_password() {
        let acct = account();
        assert_eq!(authenticate(&acct, "wrong"), Err(DomainError::BadCredential));
        assert_eq!(authenticate(&acct, "pw"), Ok(()));
    }
}
