//! Sign-in state over a session store

use crate::fixtures::UserDirectory;
use crate::store::SessionStore;
use gymadmin_core::{Error, Result, Role, User};
use tracing::{info, warn};

/// Session key holding the signed-in user as JSON
pub const USER_KEY: &str = "adminUser";

/// Session key holding the opaque token
pub const TOKEN_KEY: &str = "adminToken";

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Admin sign-in state
///
/// All state lives in the store, so a context built over a store that
/// already holds a session starts signed in.
#[derive(Debug)]
pub struct AuthContext<S> {
    directory: UserDirectory,
    store: S,
}

impl<S: SessionStore> AuthContext<S> {
    /// Context over `store`, restoring any session it holds
    ///
    /// A stored user that no longer parses is treated as signed out and
    /// both session keys are cleared.
    pub fn new(directory: UserDirectory, store: S) -> Self {
        let context = Self { directory, store };
        context.restore();
        context
    }

    fn restore(&self) {
        let stored = match self.store.get(USER_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Session store unreadable, starting signed out");
                return;
            }
        };

        if let Some(json) = stored {
            if serde_json::from_str::<User>(&json).is_err() {
                warn!("Stored session user is corrupt, clearing session");
                if let Err(e) = self.clear() {
                    warn!(error = %e, "Failed to clear corrupt session");
                }
            }
        }
    }

    fn clear(&self) -> Result<()> {
        self.store.remove(USER_KEY)?;
        self.store.remove(TOKEN_KEY)
    }

    /// Sign in with fixture credentials
    ///
    /// # Errors
    ///
    /// [`Error::Authentication`] for an unknown email or wrong password,
    /// [`Error::Unauthorized`] for a valid account without the admin role,
    /// or a store error if the session cannot be saved.
    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        let account = self
            .directory
            .find_by_email(email)
            .filter(|account| account.password.verify(password))
            .ok_or_else(|| {
                warn!(email = %email.trim(), "Sign-in rejected");
                Error::Authentication(INVALID_CREDENTIALS.to_string())
            })?;

        if account.user.role != Role::Admin {
            warn!(email = %account.user.email, role = %account.user.role, "Non-admin sign-in refused");
            return Err(Error::Unauthorized);
        }

        let user = account.user.clone();
        self.store.set(USER_KEY, &serde_json::to_string(&user)?)?;
        self.store.set(TOKEN_KEY, &uuid::Uuid::new_v4().to_string())?;

        info!(user_id = %user.id, email = %user.email, "Admin signed in");
        Ok(user)
    }

    /// Sign out; signing out twice is fine
    ///
    /// # Errors
    ///
    /// Returns a store error if the session cannot be removed.
    pub fn logout(&self) -> Result<()> {
        self.clear()?;
        info!("Admin signed out");
        Ok(())
    }

    /// Signed-in user, if any
    pub fn current_user(&self) -> Option<User> {
        self.store
            .get(USER_KEY)
            .ok()
            .flatten()
            .and_then(|json| serde_json::from_str(&json).ok())
    }

    /// Session token, if any
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).ok().flatten()
    }

    /// Whether a user and token are both present
    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some() && self.token().is_some()
    }

    /// `Authorization` header for backend requests
    pub fn auth_header(&self) -> Option<(&'static str, String)> {
        self.token()
            .map(|token| ("Authorization", format!("Bearer {token}")))
    }

    /// Underlying store
    pub const fn store(&self) -> &S {
        &self.store
    }
}
