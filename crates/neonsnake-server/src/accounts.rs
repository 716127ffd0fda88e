use std::collections::HashMap;

use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::time::timestamp_now;

/// Public view of an account, as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

struct StoredAccount {
    user: User,
    password_digest: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SignupError {
    EmailTaken,
}

/// In-memory account and session store.
///
/// Sessions are keyed by the random id embedded in the signed bearer token;
/// there is no ambient current-user anywhere — every authenticated call
/// resolves its caller through a session id.
#[derive(Default)]
pub struct AccountStore {
    accounts: HashMap<String, StoredAccount>,
    sessions: HashMap<String, String>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new account. Emails are unique.
    pub fn signup(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, SignupError> {
        if self.accounts.contains_key(email) {
            return Err(SignupError::EmailTaken);
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            created_at: timestamp_now(),
        };
        self.accounts.insert(
            email.to_string(),
            StoredAccount {
                user: user.clone(),
                password_digest: digest(email, password),
            },
        );
        Ok(user)
    }

    /// Check credentials. Returns the account's public view on a match;
    /// unknown email and wrong password are indistinguishable to the caller.
    pub fn login(&self, email: &str, password: &str) -> Option<User> {
        let account = self.accounts.get(email)?;
        if account.password_digest != digest(email, password) {
            return None;
        }
        Some(account.user.clone())
    }

    /// Bind a verified session id to an account.
    pub fn create_session(&mut self, session_id: &str, email: &str) {
        self.sessions
            .insert(session_id.to_string(), email.to_string());
    }

    /// Drop a session. Returns whether it existed.
    pub fn destroy_session(&mut self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    /// Resolve a session id to its account.
    pub fn user_for_session(&self, session_id: &str) -> Option<User> {
        let email = self.sessions.get(session_id)?;
        self.accounts.get(email).map(|a| a.user.clone())
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

/// Salted (by email) SHA-256 digest. Not a real KDF; this store only needs
/// to keep plaintext passwords out of memory.
fn digest(email: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_then_login() {
        let mut store = AccountStore::new();
        let user = store.signup("NeonMaster", "neon@example.com", "hunter22").unwrap();
        assert_eq!(user.username, "NeonMaster");

        let logged_in = store.login("neon@example.com", "hunter22").unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[test]
    fn duplicate_email_rejected() {
        let mut store = AccountStore::new();
        store.signup("a", "dup@example.com", "pw1234").unwrap();
        assert_eq!(
            store.signup("b", "dup@example.com", "pw5678"),
            Err(SignupError::EmailTaken)
        );
    }

    #[test]
    fn wrong_password_and_unknown_email_both_fail() {
        let mut store = AccountStore::new();
        store.signup("a", "a@example.com", "correct-pw").unwrap();
        assert!(store.login("a@example.com", "wrong-pw").is_none());
        assert!(store.login("nobody@example.com", "correct-pw").is_none());
    }

    #[test]
    fn session_lifecycle() {
        let mut store = AccountStore::new();
        let user = store.signup("a", "a@example.com", "pw1234").unwrap();

        store.create_session("sess-1", "a@example.com");
        assert_eq!(store.session_count(), 1);
        assert_eq!(store.user_for_session("sess-1").unwrap().id, user.id);

        assert!(store.destroy_session("sess-1"));
        assert!(store.user_for_session("sess-1").is_none());
        assert!(!store.destroy_session("sess-1"));
    }

    #[test]
    fn same_password_different_emails_digest_differently() {
        assert_ne!(digest("a@x.com", "pw"), digest("b@x.com", "pw"));
    }
}
