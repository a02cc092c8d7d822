//! Fixture accounts used for sign-in

use gymadmin_core::utils::normalize_email;
use gymadmin_core::{Error, Result, User};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Stored password, either legacy plaintext or a bcrypt hash
///
/// Serialized as a bare string; strings starting with `$2` are hashes.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PasswordCredential {
    /// Plaintext password
    Plain(String),
    /// bcrypt hash
    Bcrypt(String),
}

impl PasswordCredential {
    /// Hash `password` with the default bcrypt cost
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails.
    pub fn hash(password: &str) -> Result<Self> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map(Self::Bcrypt)
            .map_err(|e| Error::Other(format!("password hashing failed: {e}")))
    }

    /// Whether `candidate` matches
    pub fn verify(&self, candidate: &str) -> bool {
        match self {
            Self::Plain(expected) => expected == candidate,
            Self::Bcrypt(hash) => bcrypt::verify(candidate, hash).unwrap_or_else(|e| {
                warn!(error = %e, "Malformed bcrypt hash in fixtures");
                false
            }),
        }
    }
}

impl From<String> for PasswordCredential {
    fn from(value: String) -> Self {
        if value.starts_with("$2") {
            Self::Bcrypt(value)
        } else {
            Self::Plain(value)
        }
    }
}

impl From<PasswordCredential> for String {
    fn from(value: PasswordCredential) -> Self {
        match value {
            PasswordCredential::Plain(s) | PasswordCredential::Bcrypt(s) => s,
        }
    }
}

impl std::fmt::Debug for PasswordCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain(_) => f.write_str("Plain(***)"),
            Self::Bcrypt(_) => f.write_str("Bcrypt(***)"),
        }
    }
}

/// A user record plus its password
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureUser {
    /// Account details
    #[serde(flatten)]
    pub user: User,
    /// Password credential
    pub password: PasswordCredential,
}

/// The set of accounts sign-in checks against
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<FixtureUser>,
}

impl UserDirectory {
    /// Directory over the given accounts
    pub const fn from_users(users: Vec<FixtureUser>) -> Self {
        Self { users }
    }

    /// Load a JSON array of accounts
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or is not a JSON array of accounts.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::Configuration {
            message: format!("cannot read user fixtures {}: {e}", path.display()),
        })?;
        let users: Vec<FixtureUser> = serde_json::from_str(&text)?;
        debug!(path = %path.display(), count = users.len(), "Loaded user fixtures");
        Ok(Self { users })
    }

    /// Find an account by email, ignoring case and surrounding spaces
    pub fn find_by_email(&self, email: &str) -> Option<&FixtureUser> {
        let wanted = normalize_email(email);
        self.users
            .iter()
            .find(|u| normalize_email(&u.user.email) == wanted)
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether there are no accounts
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_credential_kind_from_string() {
        assert!(matches!(
            PasswordCredential::from("admin123".to_string()),
            PasswordCredential::Plain(_)
        ));
        assert!(matches!(
            PasswordCredential::from("$2b$04$abcdefghijklmnopqrstuv".to_string()),
            PasswordCredential::Bcrypt(_)
        ));
    }

    #[test]
    fn test_bcrypt_verify() {
        let hashed = bcrypt::hash("s3cret", 4).unwrap();
        let credential = PasswordCredential::from(hashed);
        assert!(credential.verify("s3cret"));
        assert!(!credential.verify("S3cret"));
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        assert!(!PasswordCredential::Bcrypt("$2-broken".to_string()).verify("$2-broken"));
    }

    #[test]
    fn test_debug_hides_password() {
        let shown = format!("{:?}", PasswordCredential::Plain("hunter2".to_string()));
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn test_parse_and_lookup() {
        let json = r#"[
            {"id": "1", "name": "Admin", "email": "Admin@Example.com", "role": "admin", "password": "admin123"},
            {"id": "2", "name": "Mia", "email": "mia@example.com", "role": "member", "password": "member123"}
        ]"#;
        let users: Vec<FixtureUser> = serde_json::from_str(json).unwrap();
        let directory = UserDirectory::from_users(users);

        assert_eq!(directory.len(), 2);
        let admin = directory.find_by_email("  admin@EXAMPLE.com ").unwrap();
        assert_eq!(admin.user.id, "1");
        assert!(admin.password.verify("admin123"));
        assert!(directory.find_by_email("nobody@example.com").is_none());
    }
}
