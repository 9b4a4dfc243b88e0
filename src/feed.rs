//! Feed loading with a degraded path for missing indexes
//!
//! The preferred query filters by category and orders by creation time in the
//! store. Deployments that have not provisioned the compound index reject
//! that query; the loader then asks for the filtered page only and sorts it
//! in memory.

use crate::backend::{DocumentStore, PostOrder, PostQuery};
use crate::error::{Error, Result};
use crate::types::{Article, Category};

/// One page request against the `posts` collection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedRequest {
    /// Only articles in this category (None = all)
    pub category: Option<Category>,
    /// Maximum number of articles
    pub limit: usize,
}

impl FeedRequest {
    /// Request for the home page
    pub fn home(limit: usize) -> Self {
        Self {
            category: None,
            limit,
        }
    }

    /// Request for a category page
    pub fn category(category: Category, limit: usize) -> Self {
        Self {
            category: Some(category),
            limit,
        }
    }
}

/// Load up to `request.limit` articles, newest first.
///
/// A [`Error::FailedPrecondition`] from the ordered query triggers one
/// unordered query with the same filter and limit, sorted in memory. Any
/// other error is returned as is and no articles are produced.
pub async fn load_feed(store: &dyn DocumentStore, request: FeedRequest) -> Result<Vec<Article>> {
    let ordered = PostQuery::latest(request.category, request.limit);

    match store.query_posts(ordered).await {
        Ok(articles) => Ok(articles),
        Err(Error::FailedPrecondition(reason)) => {
            tracing::warn!(
                category = ?request.category,
                %reason,
                "ordered feed query rejected, falling back to in-memory sort"
            );
            let unordered = PostQuery {
                order: PostOrder::Unordered,
                ..ordered
            };
            let mut articles = store.query_posts(unordered).await?;
            sort_newest_first(&mut articles);
            Ok(articles)
        }
        Err(e) => Err(e),
    }
}

/// Stable sort by creation time, descending. Articles without a timestamp
/// count as 0 and sort last.
pub fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by_key(|article| std::cmp::Reverse(article.created_at_or_zero()));
}
