//! Static account directory for credential authentication.
//!
//! The platform has a small, fixed set of staff and student logins, so
//! accounts are declared in server configuration rather than a user
//! store. Passwords are kept as Argon2 hashes in PHC string format.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use etalase_core::UserId;
use serde::Deserialize;

use crate::role::Role;

/// A login account declared in server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// Stable account id; becomes the subject of issued tokens.
    #[serde(default)]
    id: UserId,
    /// Login name, unique within the directory.
    username: String,
    /// Argon2 password hash in PHC string format.
    password_hash: String,
    /// Role granted to sessions of this account.
    role: Role,
}

impl Account {
    /// Creates an account with a freshly generated id.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            password_hash: password_hash.into(),
            role,
        }
    }

    /// Returns the account id.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the account's role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}

/// The set of accounts permitted to sign in.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AccountDirectory {
    accounts: Vec<Account>,
}

impl AccountDirectory {
    /// Creates a directory from a list of accounts.
    #[must_use]
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// Returns true if the directory has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Returns the number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Verifies a username/password pair against the directory.
    ///
    /// Returns the matching account, or `None` when the username is
    /// unknown, the stored hash fails to parse, or the password does not
    /// match. The failure modes are indistinguishable to the caller.
    #[must_use]
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&Account> {
        let account = self.accounts.iter().find(|a| a.username == username)?;

        let parsed = match PasswordHash::new(&account.password_hash) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!(
                    username = %account.username,
                    error = %e,
                    "account has an unparseable password hash"
                );
                return None;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .ok()
            .map(|()| account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};

    fn hash(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .expect("hash password")
            .to_string()
    }

    fn directory() -> AccountDirectory {
        AccountDirectory::new(vec![
            Account::new("admin", hash("admin123"), Role::Admin),
            Account::new("mahasiswa", hash("mhs123"), Role::Student),
        ])
    }

    #[test]
    fn authenticate_accepts_valid_credentials() {
        let dir = directory();

        let account = dir.authenticate("admin", "admin123").expect("should match");
        assert_eq!(account.username(), "admin");
        assert_eq!(account.role(), Role::Admin);

        let account = dir
            .authenticate("mahasiswa", "mhs123")
            .expect("should match");
        assert_eq!(account.role(), Role::Student);
    }

    #[test]
    fn authenticate_rejects_wrong_password() {
        let dir = directory();
        assert!(dir.authenticate("admin", "admin124").is_none());
    }

    #[test]
    fn authenticate_rejects_unknown_username() {
        let dir = directory();
        assert!(dir.authenticate("nobody", "admin123").is_none());
    }

    #[test]
    fn authenticate_rejects_unparseable_hash() {
        let dir = AccountDirectory::new(vec![Account::new(
            "broken",
            "not-a-phc-string",
            Role::Admin,
        )]);
        assert!(dir.authenticate("broken", "anything").is_none());
    }

    #[test]
    fn empty_directory_authenticates_nobody() {
        let dir = AccountDirectory::default();
        assert!(dir.is_empty());
        assert!(dir.authenticate("admin", "admin123").is_none());
    }
}
