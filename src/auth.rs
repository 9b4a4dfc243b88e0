//! Email/password authentication for admins
//!
//! Accounts are provisioned from configuration at startup. Passwords are
//! stored as salted SHA-256 digests; a successful sign-in opens a session
//! identified by a random bearer token.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tokio::sync::broadcast;

use crate::backend::AuthProvider;
use crate::config::AccountConfig;
use crate::db::{Database, SessionRow};
use crate::error::{Error, Result};
use crate::types::{Actor, Event, Session};

/// Message shown for any failed sign-in
pub const SIGN_IN_FAILED_MESSAGE: &str = "Invalid credentials or error logging in.";

const TOKEN_BYTES: usize = 32;
const SALT_BYTES: usize = 16;

/// [`AuthProvider`] backed by the admin tables in the database
pub struct Authenticator {
    db: Arc<Database>,
    session_ttl: Duration,
    event_tx: broadcast::Sender<Event>,
}

impl Authenticator {
    /// Create an authenticator whose sessions last `session_ttl`
    pub fn new(db: Arc<Database>, session_ttl: Duration, event_tx: broadcast::Sender<Event>) -> Self {
        Self {
            db,
            session_ttl,
            event_tx,
        }
    }

    /// Create or update the configured admin accounts
    pub async fn bootstrap_accounts(&self, accounts: &[AccountConfig]) -> Result<()> {
        for account in accounts {
            let email = normalize_email(&account.email);
            let salt = random_hex(SALT_BYTES);
            let hash = hash_password(&salt, &account.password);
            self.db
                .upsert_account(&email, &hash, &salt, account.can_publish)
                .await?;
            tracing::info!(email = %email, can_publish = account.can_publish, "admin account provisioned");
        }
        Ok(())
    }

    fn emit(&self, event: Event) {
        // No receivers is fine
        let _ = self.event_tx.send(event);
    }
}

#[async_trait]
impl AuthProvider for Authenticator {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = normalize_email(email);
        let Some(account) = self.db.find_account(&email).await? else {
            tracing::warn!(email = %email, "sign-in for unknown account");
            return Err(Error::Unauthorized(SIGN_IN_FAILED_MESSAGE.to_string()));
        };

        let candidate = hash_password(&account.salt, password);
        if !constant_time_eq(candidate.as_bytes(), account.password_hash.as_bytes()) {
            tracing::warn!(email = %email, "sign-in with wrong password");
            return Err(Error::Unauthorized(SIGN_IN_FAILED_MESSAGE.to_string()));
        }

        let now = chrono::Utc::now().timestamp();
        let purged = self.db.delete_expired_sessions(now).await?;
        if purged > 0 {
            tracing::debug!(purged, "expired sessions removed");
        }

        let token = random_hex(TOKEN_BYTES);
        let ttl = i64::try_from(self.session_ttl.as_secs()).unwrap_or(i64::MAX);
        let expires_at = now.saturating_add(ttl);
        self.db
            .insert_session(&token, &account.email, now, expires_at)
            .await?;

        tracing::info!(email = %account.email, "admin signed in");
        self.emit(Event::SignedIn {
            email: account.email.clone(),
        });

        Ok(Session {
            token,
            actor: account.actor(),
            created_at: now,
            expires_at,
        })
    }

    async fn current_session(&self, token: &str) -> Result<Option<Session>> {
        let Some(row) = self.db.find_session(token).await? else {
            return Ok(None);
        };

        if row.expires_at <= chrono::Utc::now().timestamp() {
            self.db.delete_session(token).await?;
            tracing::debug!(email = %row.email, "session expired");
            return Ok(None);
        }

        Ok(Some(session_from_row(row)))
    }

    async fn sign_out(&self, token: &str) -> Result<Option<Session>> {
        let Some(row) = self.db.find_session(token).await? else {
            return Ok(None);
        };
        self.db.delete_session(token).await?;

        tracing::info!(email = %row.email, "admin signed out");
        self.emit(Event::SignedOut {
            email: row.email.clone(),
        });
        Ok(Some(session_from_row(row)))
    }
}

fn session_from_row(row: SessionRow) -> Session {
    Session {
        token: row.token,
        actor: Actor {
            email: row.email,
            can_publish: row.can_publish != 0,
        },
        created_at: row.created_at,
        expires_at: row.expires_at,
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Hex SHA-256 of `salt` followed by `password`
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn random_hex(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Constant-time byte comparison to prevent timing side-channel attacks.
/// Always compares all bytes regardless of where the first mismatch occurs.
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    async fn authenticator(ttl: Duration) -> (Authenticator, broadcast::Receiver<Event>, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db = Arc::new(Database::new(temp_file.path()).await.unwrap());
        let (event_tx, event_rx) = broadcast::channel(16);
        let auth = Authenticator::new(db, ttl, event_tx);
        auth.bootstrap_accounts(&[AccountConfig {
            email: " Editor@Example.com ".into(),
            password: "correct horse".into(),
            can_publish: true,
        }])
        .await
        .unwrap();
        (auth, event_rx, temp_file)
    }

    #[tokio::test]
    async fn sign_in_opens_session_and_emits_event() {
        let (auth, mut events, _db) = authenticator(Duration::from_secs(60)).await;

        let session = auth
            .sign_in("editor@example.com", "correct horse")
            .await
            .unwrap();

        assert_eq!(session.actor.email, "editor@example.com");
        assert!(session.actor.can_publish);
        assert_eq!(session.token.len(), TOKEN_BYTES * 2);
        assert_eq!(session.expires_at - session.created_at, 60);

        match events.recv().await.unwrap() {
            Event::SignedIn { email } => assert_eq!(email, "editor@example.com"),
            other => panic!("unexpected event {:?}", other),
        }

        let current = auth.current_session(&session.token).await.unwrap();
        assert_eq!(current, Some(session));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_account_share_message() {
        let (auth, _events, _db) = authenticator(Duration::from_secs(60)).await;

        for (email, password) in [
            ("editor@example.com", "wrong"),
            ("nobody@example.com", "correct horse"),
        ] {
            match auth.sign_in(email, password).await {
                Err(Error::Unauthorized(message)) => assert_eq!(message, SIGN_IN_FAILED_MESSAGE),
                other => panic!("expected unauthorized, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn sign_out_closes_session() {
        let (auth, mut events, _db) = authenticator(Duration::from_secs(60)).await;
        let session = auth
            .sign_in("EDITOR@example.com", "correct horse")
            .await
            .unwrap();
        let _ = events.recv().await;

        let closed = auth.sign_out(&session.token).await.unwrap();
        assert_eq!(closed.map(|s| s.actor.email).as_deref(), Some("editor@example.com"));
        assert!(matches!(events.recv().await.unwrap(), Event::SignedOut { .. }));

        assert!(auth.current_session(&session.token).await.unwrap().is_none());
        assert!(auth.sign_out(&session.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_session_is_not_current() {
        let (auth, _events, _db) = authenticator(Duration::from_secs(1)).await;
        let session = auth
            .sign_in("editor@example.com", "correct horse")
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert!(auth.current_session(&session.token).await.unwrap().is_none());
    }

    #[test]
    fn password_hash_depends_on_salt() {
        assert_ne!(hash_password("a", "pw"), hash_password("b", "pw"));
        assert_eq!(hash_password("a", "pw").len(), 64);
    }

    #[test]
    fn constant_time_eq_compares_content_and_length() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
    }
}
