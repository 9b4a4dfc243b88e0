//! Backend collaborator traits
//!
//! The newsroom talks to three collaborators: a document store for posts and
//! the banner configuration, an auth provider for admin sessions, and blob
//! storage for uploaded images. The crate ships SQLite- and filesystem-backed
//! implementations ([`crate::db::Database`], [`crate::auth::Authenticator`],
//! [`crate::storage::LocalBlobStorage`]); tests substitute their own.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::{Error, Resource, Result};
use crate::types::{
    Actor, Article, ArticleId, BannerConfig, Category, NewPost, Session, StoreChange,
    StoredObject, UploadProgress,
};

/// Ordering requested from the document store
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PostOrder {
    /// Newest first by creation time; documents without a timestamp last
    CreatedDesc,
    /// Whatever order the store returns
    Unordered,
}

/// Query against the `posts` collection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PostQuery {
    /// Equality filter on the category field
    pub category: Option<Category>,
    /// Requested ordering
    pub order: PostOrder,
    /// Maximum number of documents
    pub limit: Option<usize>,
}

impl PostQuery {
    /// Newest `limit` posts, optionally in one category
    pub fn latest(category: Option<Category>, limit: usize) -> Self {
        Self {
            category,
            order: PostOrder::CreatedDesc,
            limit: Some(limit),
        }
    }

    /// Every post, newest first
    pub fn all_newest_first() -> Self {
        Self {
            category: None,
            order: PostOrder::CreatedDesc,
            limit: None,
        }
    }

    /// Whether the store needs a compound (category, created_at) index to
    /// answer this query
    pub fn needs_compound_index(&self) -> bool {
        self.category.is_some() && self.order == PostOrder::CreatedDesc
    }
}

/// Document store holding the `posts` and `ads` collections
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Run a query against `posts`.
    ///
    /// Fails with [`Error::FailedPrecondition`] when the query needs an index
    /// the deployment has not provisioned.
    async fn query_posts(&self, query: PostQuery) -> Result<Vec<Article>>;

    /// Fetch one post by id
    async fn get_post(&self, id: &ArticleId) -> Result<Option<Article>>;

    /// Add a post; the store assigns the id, a server timestamp and a zero view count
    async fn add_post(&self, actor: &Actor, post: NewPost) -> Result<ArticleId>;

    /// Delete a post. Returns whether it existed.
    async fn delete_post(&self, actor: &Actor, id: &ArticleId) -> Result<bool>;

    /// Read the singleton banner configuration
    async fn banner_config(&self) -> Result<Option<BannerConfig>>;

    /// Overwrite the singleton banner configuration
    async fn set_banner_config(&self, actor: &Actor, config: BannerConfig) -> Result<()>;

    /// Change notifications for live views
    fn changes(&self) -> broadcast::Receiver<StoreChange>;
}

/// Email/password authentication for admins
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Sign in and open a session
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// Look up a live session by token
    async fn current_session(&self, token: &str) -> Result<Option<Session>>;

    /// Close a session. Returns the session that was closed, if any.
    async fn sign_out(&self, token: &str) -> Result<Option<Session>>;
}

/// Blob storage for uploaded images
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Write `data` under `key`, reporting progress as chunks are written
    async fn upload(
        &self,
        actor: &Actor,
        key: &str,
        data: &[u8],
        on_progress: &(dyn Fn(UploadProgress) + Send + Sync),
    ) -> Result<StoredObject>;

    /// Abandon an upload, removing anything partially written
    async fn cancel(&self, key: &str) -> Result<()>;

    /// Public URL of a completed object
    async fn download_url(&self, key: &str) -> Result<String>;
}

/// Write rule shared by the built-in collaborators: only accounts allowed to
/// publish may write.
pub fn authorize_write(actor: &Actor, resource: Resource) -> Result<()> {
    if actor.can_publish {
        Ok(())
    } else {
        tracing::warn!(email = %actor.email, %resource, "write rejected by backend rules");
        Err(Error::PermissionDenied { resource })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_filtered_ordered_queries_need_compound_index() {
        assert!(PostQuery::latest(Some(Category::Sport), 20).needs_compound_index());
        assert!(!PostQuery::latest(None, 10).needs_compound_index());
        assert!(!PostQuery::all_newest_first().needs_compound_index());

        let unordered = PostQuery {
            order: PostOrder::Unordered,
            ..PostQuery::latest(Some(Category::Cinema), 20)
        };
        assert!(!unordered.needs_compound_index());
    }

    #[test]
    fn readers_cannot_write() {
        let reader = Actor {
            email: "viewer@example.com".into(),
            can_publish: false,
        };
        let editor = Actor {
            email: "editor@example.com".into(),
            can_publish: true,
        };

        assert!(matches!(
            authorize_write(&reader, Resource::Posts),
            Err(Error::PermissionDenied {
                resource: Resource::Posts
            })
        ));
        assert!(authorize_write(&editor, Resource::Storage).is_ok());
    }
}
