//! `brewtab-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: token
//! persistence and account lookup sit behind traits the persistence
//! layer implements.

pub mod account;
pub mod gate;
pub mod password;
pub mod token;

pub use account::Account;
pub use gate::{AccountSource, AuthError, Gate, authenticate, require_active, require_admin};
pub use token::TokenService;
