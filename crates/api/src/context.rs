use brewtab_auth::Account;
use brewtab_core::AccountId;

/// Resolved acting account for a request.
///
/// Inserted by the auth middleware after token resolution; the
/// state checks (active/admin) are applied per handler, not here.
#[derive(Debug, Clone)]
pub struct AccountContext {
    account: Account,
}

impl AccountContext {
    pub fn new(account: Account) -> Self {
        Self { account }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn account_id(&self) -> AccountId {
        self.account.id
    }
}
