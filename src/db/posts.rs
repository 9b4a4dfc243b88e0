//! The `posts` collection.

use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::backend::{PostOrder, PostQuery};
use crate::error::DatabaseError;
use crate::types::{Article, ArticleId, NewPost};
use crate::{Error, Result};

use super::{Database, PostRow};

/// Length of generated document ids
const ID_LEN: usize = 20;

const POST_COLUMNS: &str = "id, title, english_title, content, english_content, \
                            image_url, video_link, category, created_at, views";

impl Database {
    /// Insert a post with a fresh id, the current server time and a zero
    /// view count
    pub async fn insert_post(&self, post: &NewPost) -> Result<ArticleId> {
        let id = generate_id();
        let now = chrono::Utc::now().timestamp();

        sqlx::query(
            r#"
            INSERT INTO posts (
                id, title, english_title, content, english_content,
                image_url, video_link, category, created_at, views
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0)
            "#,
        )
        .bind(&id)
        .bind(&post.title)
        .bind(&post.english_title)
        .bind(&post.content)
        .bind(&post.english_content)
        .bind(&post.image_url)
        .bind(&post.video_link)
        .bind(post.category.slug())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| query_failed("Failed to insert post", e))?;

        Ok(ArticleId(id))
    }

    /// Get a post by id
    pub async fn find_post(&self, id: &ArticleId) -> Result<Option<Article>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {} FROM posts WHERE id = ?",
            POST_COLUMNS
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_failed("Failed to get post", e))?;

        Ok(row.and_then(PostRow::into_article))
    }

    /// Run a feed query.
    ///
    /// An ordered query filtered by category is refused with
    /// [`Error::FailedPrecondition`] unless the compound index exists.
    ///
    /// Rows with an unknown category are dropped after the SQL `LIMIT`, so
    /// the result can be shorter than `query.limit` even when more valid
    /// posts exist.
    pub async fn select_posts(&self, query: PostQuery) -> Result<Vec<Article>> {
        if query.needs_compound_index() && !self.has_compound_index().await? {
            return Err(Error::FailedPrecondition(format!(
                "query on posts filtered by category and ordered by created_at requires index {}",
                super::COMPOUND_INDEX
            )));
        }

        let mut builder = sqlx::QueryBuilder::new(format!("SELECT {} FROM posts", POST_COLUMNS));

        if let Some(category) = query.category {
            builder.push(" WHERE category = ");
            builder.push_bind(category.slug());
        }

        if query.order == PostOrder::CreatedDesc {
            // NULL timestamps count as 0 and sort last; rowid keeps ties stable
            builder.push(" ORDER BY COALESCE(created_at, 0) DESC, rowid ASC");
        }

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ");
            builder.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows = builder
            .build_query_as::<PostRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to query posts", e))?;

        Ok(rows.into_iter().filter_map(PostRow::into_article).collect())
    }

    /// Delete a post by id. Returns whether a row was removed.
    pub async fn remove_post(&self, id: &ArticleId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to delete post", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Count stored posts
    pub async fn count_posts(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to count posts", e))?;

        Ok(count)
    }
}

fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LEN)
        .map(char::from)
        .collect()
}

pub(super) fn query_failed(context: &str, e: sqlx::Error) -> Error {
    Error::Database(DatabaseError::QueryFailed(format!("{}: {}", context, e)))
}
