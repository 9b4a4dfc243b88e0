//! [`DocumentStore`] backed by SQLite.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::Result;
use crate::backend::{DocumentStore, PostQuery, authorize_write};
use crate::error::Resource;
use crate::types::{Actor, Article, ArticleId, BannerConfig, NewPost, StoreChange};

use super::Database;

#[async_trait]
impl DocumentStore for Database {
    async fn query_posts(&self, query: PostQuery) -> Result<Vec<Article>> {
        self.select_posts(query).await
    }

    async fn get_post(&self, id: &ArticleId) -> Result<Option<Article>> {
        self.find_post(id).await
    }

    async fn add_post(&self, actor: &Actor, post: NewPost) -> Result<ArticleId> {
        authorize_write(actor, Resource::Posts)?;
        let id = self.insert_post(&post).await?;
        self.notify(StoreChange::Posts);
        Ok(id)
    }

    async fn delete_post(&self, actor: &Actor, id: &ArticleId) -> Result<bool> {
        authorize_write(actor, Resource::Posts)?;
        let removed = self.remove_post(id).await?;
        if removed {
            self.notify(StoreChange::Posts);
        }
        Ok(removed)
    }

    async fn banner_config(&self) -> Result<Option<BannerConfig>> {
        self.load_banner().await
    }

    async fn set_banner_config(&self, actor: &Actor, config: BannerConfig) -> Result<()> {
        authorize_write(actor, Resource::Ads)?;
        self.store_banner(&config).await?;
        self.notify(StoreChange::Ads);
        Ok(())
    }

    fn changes(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}
