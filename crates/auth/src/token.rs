//! Opaque bearer tokens.
//!
//! Tokens carry no claims; the token store maps each one to an account id.
//! They do not expire on their own and are only revoked when their account
//! is deleted.

use rand::Rng;
use rand::distributions::Alphanumeric;

use brewtab_core::AccountId;

/// Length of a minted bearer token.
pub const TOKEN_LEN: usize = 40;

/// Mint a fresh opaque token.
pub fn mint() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Credential/token collaborator contract.
pub trait TokenService: Send + Sync {
    /// Mint and persist a token for `account_id`, returning it.
    fn issue(&self, account_id: AccountId) -> String;

    /// Resolve a presented token to its account id, if known.
    fn resolve(&self, token: &str) -> Option<AccountId>;

    /// Drop every token issued to `account_id`.
    fn revoke_account(&self, account_id: AccountId);
}

impl<T> TokenService for std::sync::Arc<T>
where
    T: TokenService + ?Sized,
{
    fn issue(&self, account_id: AccountId) -> String {
        (**self).issue(account_id)
    }

    fn resolve(&self, token: &str) -> Option<AccountId> {
        (**self).resolve(token)
    }

    fn revoke_account(&self, account_id: AccountId) {
        (**self).revoke_account(account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_tokens_are_opaque_alphanumeric_strings() {
        let token = mint();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn minted_tokens_do_not_collide_in_practice() {
        assert_ne!(mint(), mint());
    }
}
