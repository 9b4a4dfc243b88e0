//! Route handlers for the REST API
//!
//! Handlers are organized by audience:
//! - [`news`] - Home feed, category feeds and article pages
//! - [`locale`] - Labels and the language toggle
//! - [`session`] - Admin sign-in state
//! - [`posts`] - Publishing, deleting and post history
//! - [`ads`] - Banner configuration
//! - [`system`] - Health, OpenAPI, event stream

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::locale::Language;
use crate::types::{ArticleId, Category, Session};

mod ads;
mod locale;
mod news;
mod posts;
mod session;
mod system;

pub use ads::*;
pub use locale::*;
pub use news::*;
pub use posts::*;
pub use session::*;
pub use system::*;

// ============================================================================
// Request/Response Types (shared across handlers)
// ============================================================================

/// Entry in GET /categories
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CategoryInfo {
    /// URL slug
    pub slug: Category,
    /// Navigation label in the reader's language
    pub label: String,
}

/// Response for GET /labels
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LabelsResponse {
    /// Language the labels are in
    pub language: Language,
    /// Label key to display text
    pub labels: BTreeMap<String, String>,
}

/// Response for GET /language and POST /language/toggle
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LanguageResponse {
    /// Active language
    pub language: Language,
    /// Whether articles show their English fields
    pub secondary: bool,
}

impl From<Language> for LanguageResponse {
    fn from(language: Language) -> Self {
        Self {
            language,
            secondary: language.is_secondary(),
        }
    }
}

/// Request body for POST /session/login
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// A signed-in admin session
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SessionResponse {
    /// Bearer token for admin routes
    pub token: String,
    /// Account email
    pub email: String,
    /// Whether the account may publish
    pub can_publish: bool,
    /// Expiry (seconds since epoch)
    pub expires_at: i64,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            email: session.actor.email,
            can_publish: session.actor.can_publish,
            expires_at: session.expires_at,
        }
    }
}

/// Response for GET /session
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SessionStatus {
    /// Whether the bearer token belongs to a live session
    pub signed_in: bool,
    /// The session, when signed in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionResponse>,
}

/// Response for POST /admin/posts
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PublishedResponse {
    /// Id of the new article
    pub id: ArticleId,
}
