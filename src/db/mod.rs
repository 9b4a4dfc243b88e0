//! Database layer for realnews
//!
//! SQLite persistence for the document store and admin accounts.
//!
//! ## Submodules
//!
//! Methods on [`Database`] are organized by domain:
//! - [`migrations`]: Database lifecycle, schema migrations, index provisioning
//! - [`posts`]: The `posts` collection
//! - [`ads`]: The singleton banner configuration
//! - [`accounts`]: Admin accounts and sessions
//! - [`store`]: [`DocumentStore`](crate::backend::DocumentStore) implementation

use crate::types::{Actor, Article, ArticleId, Banner, BannerConfig, Category, StoreChange};
use sqlx::{FromRow, sqlite::SqlitePool};
use tokio::sync::broadcast;

mod accounts;
mod ads;
mod migrations;
mod posts;
mod store;

/// Name of the compound index ordered category queries depend on
pub const COMPOUND_INDEX: &str = "idx_posts_category_created_at";

/// Post record from database
#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    /// Document id
    pub id: String,
    /// Tamil title
    pub title: String,
    /// English title
    pub english_title: Option<String>,
    /// Tamil body
    pub content: String,
    /// English body
    pub english_content: Option<String>,
    /// Image URL
    pub image_url: Option<String>,
    /// Video URL as entered
    pub video_link: Option<String>,
    /// Category slug as stored
    pub category: String,
    /// Unix timestamp of creation
    pub created_at: Option<i64>,
    /// View counter
    pub views: Option<i64>,
}

impl PostRow {
    /// Convert to an [`Article`]. Rows whose category is not one of the fixed
    /// set are not articles the site can show.
    pub fn into_article(self) -> Option<Article> {
        let Ok(category) = self.category.parse::<Category>() else {
            tracing::warn!(id = %self.id, category = %self.category, "skipping post with unknown category");
            return None;
        };

        Some(Article {
            id: ArticleId(self.id),
            title: self.title,
            english_title: self.english_title,
            content: self.content,
            english_content: self.english_content,
            image_url: self.image_url,
            video_link: self.video_link,
            category,
            created_at: self.created_at,
            views: self.views.map(|v| v.max(0) as u64),
        })
    }
}

/// Banner configuration record from database
#[derive(Debug, Clone, FromRow)]
pub struct BannerRow {
    /// Whether the banner is enabled (0 = no, 1 = yes)
    pub enabled: i32,
    /// Banner image URL
    pub image_url: String,
    /// Display text
    pub text: String,
    /// Target link
    pub link: String,
    /// Run length in days
    pub expiry_days: i64,
    /// Unix timestamp of the last save
    pub updated_at: Option<i64>,
}

impl From<BannerRow> for BannerConfig {
    fn from(row: BannerRow) -> Self {
        BannerConfig {
            enabled: row.enabled != 0,
            active_ad: Banner {
                image_url: row.image_url,
                text: row.text,
                link: row.link,
                expiry_days: u32::try_from(row.expiry_days).unwrap_or(1),
            },
            updated_at: row.updated_at,
        }
    }
}

/// Admin account record from database
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    /// Normalized email
    pub email: String,
    /// Hex SHA-256 of salt and password
    pub password_hash: String,
    /// Per-account salt (hex)
    pub salt: String,
    /// Whether the account may publish (0 = no, 1 = yes)
    pub can_publish: i32,
    /// Unix timestamp when the account was created
    pub created_at: i64,
}

impl AccountRow {
    /// The write identity of this account
    pub fn actor(&self) -> Actor {
        Actor {
            email: self.email.clone(),
            can_publish: self.can_publish != 0,
        }
    }
}

/// Session record from database, joined with its account
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    /// Bearer token
    pub token: String,
    /// Account email
    pub email: String,
    /// Whether the account may publish (0 = no, 1 = yes)
    pub can_publish: i32,
    /// Unix timestamp when the session was opened
    pub created_at: i64,
    /// Unix timestamp when the session expires
    pub expires_at: i64,
}

/// Database handle for realnews
pub struct Database {
    pool: SqlitePool,
    changes: broadcast::Sender<StoreChange>,
}

impl Database {
    /// Notify live views that a collection changed
    fn notify(&self, change: StoreChange) {
        // No receivers is fine: nobody is watching
        let _ = self.changes.send(change);
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
