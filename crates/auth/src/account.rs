use chrono::{DateTime, Utc};

use brewtab_core::AccountId;

/// A registered account holder.
///
/// # Invariants
/// - `last_name`/`first_name` are immutable after creation and never used
///   in balance computation.
/// - `password_hash` is an opaque PHC string; nothing outside
///   [`crate::password`] interprets it.
/// - `active` gates all derived-data access; `admin` gates privileged
///   operations. The two flags are independent axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub password_hash: String,
    pub active: bool,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// New account with the registration defaults: active, not admin.
    pub fn new(
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: AccountId::new(),
            last_name: last_name.into(),
            first_name: first_name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            active: true,
            admin: false,
            created_at: Utc::now(),
        }
    }
}
