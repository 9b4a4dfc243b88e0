//! Admin accounts and sessions.

use crate::Result;

use super::posts::query_failed;
use super::{AccountRow, Database, SessionRow};

impl Database {
    /// Create or replace an admin account
    pub async fn upsert_account(
        &self,
        email: &str,
        password_hash: &str,
        salt: &str,
        can_publish: bool,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO admins (email, password_hash, salt, can_publish, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(email) DO UPDATE SET
                password_hash = excluded.password_hash,
                salt = excluded.salt,
                can_publish = excluded.can_publish
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(salt)
        .bind(i32::from(can_publish))
        .bind(chrono::Utc::now().timestamp())
        .execute(&self.pool)
        .await
        .map_err(|e| query_failed("Failed to save admin account", e))?;

        Ok(())
    }

    /// Look up an admin account by normalized email
    pub async fn find_account(&self, email: &str) -> Result<Option<AccountRow>> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT email, password_hash, salt, can_publish, created_at FROM admins WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_failed("Failed to get admin account", e))?;

        Ok(row)
    }

    /// Record a new session
    pub async fn insert_session(
        &self,
        token: &str,
        email: &str,
        created_at: i64,
        expires_at: i64,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO sessions (token, email, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(token)
        .bind(email)
        .bind(created_at)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| query_failed("Failed to insert session", e))?;

        Ok(())
    }

    /// Look up a session and its account
    pub async fn find_session(&self, token: &str) -> Result<Option<SessionRow>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT s.token, s.email, a.can_publish, s.created_at, s.expires_at
            FROM sessions s
            JOIN admins a ON a.email = s.email
            WHERE s.token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_failed("Failed to get session", e))?;

        Ok(row)
    }

    /// Delete a session. Returns whether it existed.
    pub async fn delete_session(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to delete session", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every session that expired at or before `now`
    pub async fn delete_expired_sessions(&self, now: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to purge expired sessions", e))?;

        Ok(result.rows_affected())
    }
}
