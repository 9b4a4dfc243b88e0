//! Core types for realnews

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{Error, Result};

/// Opaque identifier of a stored article
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ArticleId(pub String);

impl ArticleId {
    /// Create a new ArticleId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ArticleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ArticleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ArticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// News category (fixed set)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Sport
    Sport,
    /// Technology
    Technology,
    /// Politics
    Political,
    /// Cinema
    Cinema,
}

impl Category {
    /// All categories in navigation order
    pub const ALL: [Category; 4] = [
        Category::Sport,
        Category::Technology,
        Category::Political,
        Category::Cinema,
    ];

    /// URL slug and stored value
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Sport => "sport",
            Category::Technology => "technology",
            Category::Political => "political",
            Category::Cinema => "cinema",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == s)
            .ok_or_else(|| Error::Validation(format!("unknown category '{}'", s)))
    }
}

/// One published news item with parallel Tamil/English fields
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Article {
    /// Document id
    pub id: ArticleId,
    /// Title in Tamil (primary language)
    pub title: String,
    /// Title in English (secondary language)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_title: Option<String>,
    /// Body in Tamil (primary language)
    pub content: String,
    /// Body in English (secondary language)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_content: Option<String>,
    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Video URL as entered by the editor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_link: Option<String>,
    /// Category
    pub category: Category,
    /// Creation time in seconds since the epoch (None = unknown / just created)
    #[serde(default)]
    pub created_at: Option<i64>,
    /// View counter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
}

impl Article {
    /// Sort key for newest-first ordering; a missing timestamp counts as 0
    pub fn created_at_or_zero(&self) -> i64 {
        self.created_at.unwrap_or(0)
    }
}

/// Article to be added to the store; the store assigns id, timestamp and views
#[derive(Clone, Debug, PartialEq)]
pub struct NewPost {
    /// Title in Tamil
    pub title: String,
    /// Title in English
    pub english_title: Option<String>,
    /// Body in Tamil
    pub content: String,
    /// Body in English
    pub english_content: Option<String>,
    /// Category
    pub category: Category,
    /// Uploaded image URL
    pub image_url: Option<String>,
    /// Video URL
    pub video_link: Option<String>,
}

/// Promotional banner shown inside the article feed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Banner {
    /// Banner image URL
    #[serde(default)]
    pub image_url: String,
    /// Display text
    #[serde(default)]
    pub text: String,
    /// Target link
    #[serde(default)]
    pub link: String,
    /// How long the banner should run, in days
    #[serde(default = "default_expiry_days")]
    pub expiry_days: u32,
}

impl Default for Banner {
    fn default() -> Self {
        Self {
            image_url: String::new(),
            text: String::new(),
            link: String::new(),
            expiry_days: default_expiry_days(),
        }
    }
}

fn default_expiry_days() -> u32 {
    5
}

/// Singleton banner configuration (`ads/config`), last writer wins
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BannerConfig {
    /// Whether the banner is injected into feeds
    #[serde(default)]
    pub enabled: bool,
    /// The banner itself
    #[serde(default)]
    pub active_ad: Banner,
    /// When the configuration was last saved (seconds since epoch)
    #[serde(default)]
    pub updated_at: Option<i64>,
}

/// Display status of the banner in the admin console
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BannerStatus {
    /// Enabled and within its run
    Active,
    /// Enabled but past `updated_at + expiry_days`
    Expired,
    /// Not enabled
    Disabled,
}

impl BannerConfig {
    /// The banner to inject, if enabled
    pub fn active(&self) -> Option<&Banner> {
        self.enabled.then_some(&self.active_ad)
    }

    /// End of the banner's run, if it has been saved
    pub fn expires_at(&self) -> Option<i64> {
        self.updated_at
            .map(|saved| saved + i64::from(self.active_ad.expiry_days) * 86_400)
    }

    /// Admin-facing status at `now`. Informational only: feed injection
    /// depends on `enabled` alone.
    pub fn status(&self, now: i64) -> BannerStatus {
        if !self.enabled {
            return BannerStatus::Disabled;
        }
        match self.expires_at() {
            Some(expires) if expires <= now => BannerStatus::Expired,
            _ => BannerStatus::Active,
        }
    }
}

/// Which collection changed in the document store
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreChange {
    /// A post was added or deleted
    Posts,
    /// The banner configuration was written
    Ads,
}

/// Signed-in admin performing a write
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Actor {
    /// Account email
    pub email: String,
    /// Whether the backend's write rules allow this account to publish
    pub can_publish: bool,
}

/// Authenticated admin session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    /// Bearer token
    pub token: String,
    /// The signed-in account
    pub actor: Actor,
    /// Creation time (seconds since epoch)
    pub created_at: i64,
    /// Expiry time (seconds since epoch)
    pub expires_at: i64,
}

/// Progress of a running blob upload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadProgress {
    /// Object key being written
    pub key: String,
    /// Bytes written so far
    pub bytes_transferred: u64,
    /// Total bytes to write
    pub total_bytes: u64,
}

impl UploadProgress {
    /// Progress percentage (0.0 to 100.0)
    pub fn percent(&self) -> f32 {
        if self.total_bytes == 0 {
            return 100.0;
        }
        (self.bytes_transferred as f64 / self.total_bytes as f64 * 100.0) as f32
    }
}

/// Result of a completed blob upload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StoredObject {
    /// Object key
    pub key: String,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Event emitted by the newsroom
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A new article was published
    PostPublished {
        /// Article id
        id: ArticleId,
        /// Article category
        category: Category,
    },

    /// An article was deleted
    PostDeleted {
        /// Article id
        id: ArticleId,
    },

    /// The banner configuration was saved
    BannerSaved {
        /// Whether the banner is now enabled
        enabled: bool,
    },

    /// Image upload progress
    UploadProgress {
        /// Object key
        key: String,
        /// Bytes written so far
        bytes_transferred: u64,
        /// Total bytes
        total_bytes: u64,
    },

    /// Image upload failed or timed out
    UploadFailed {
        /// Object key
        key: String,
        /// Failure description
        reason: String,
    },

    /// An admin signed in
    SignedIn {
        /// Account email
        email: String,
    },

    /// An admin signed out
    SignedOut {
        /// Account email
        email: String,
    },
}
