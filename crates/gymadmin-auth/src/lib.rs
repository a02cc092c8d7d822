//! Local admin sign-in for the gym admin toolkit
//!
//! Accounts come from a fixture file; the signed-in user and an opaque
//! token are kept in a [`SessionStore`]. This is a convenience gate for a
//! single operator, not a security boundary.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod context;
pub mod fixtures;
pub mod store;

pub use context::{AuthContext, TOKEN_KEY, USER_KEY};
pub use fixtures::{FixtureUser, PasswordCredential, UserDirectory};
pub use store::{FileStore, MemoryStore, SessionStore};
