//! Reader-facing pages.

use crate::assembly::assemble_feed;
use crate::error::{Error, Result};
use crate::feed::{FeedRequest, load_feed};
use crate::i18n::{self, Label};
use crate::locale::{Language, LocalizedArticle};
use crate::types::{Article, ArticleId, BannerConfig, Category};
use crate::views::{ArticlePage, FeedPage, PageMeta};

use super::Newsroom;

/// Shown when the home feed cannot be loaded
pub const HOME_FEED_FAILED_MESSAGE: &str = "Failed to load latest news. Please try again later.";

/// Shown when a category feed cannot be loaded
pub const CATEGORY_FEED_FAILED_MESSAGE: &str = "Failed to load news for this category.";

impl Newsroom {
    /// Latest articles for the home page, with the banner merged in
    pub async fn home_feed(&self, lang: Language) -> Result<FeedPage> {
        let request = FeedRequest::home(self.config.feed.home_limit);
        let articles = load_feed(self.store.as_ref(), request).await.map_err(|e| {
            tracing::error!(error = %e, "failed to load home feed");
            Error::FeedUnavailable(HOME_FEED_FAILED_MESSAGE.to_string())
        })?;

        Ok(self.feed_page(articles, lang, None).await)
    }

    /// Latest articles in `category`, with heading and banner
    pub async fn category_feed(&self, category: Category, lang: Language) -> Result<FeedPage> {
        let request = FeedRequest::category(category, self.config.feed.category_limit);
        let articles = load_feed(self.store.as_ref(), request).await.map_err(|e| {
            tracing::error!(%category, error = %e, "failed to load category feed");
            Error::FeedUnavailable(CATEGORY_FEED_FAILED_MESSAGE.to_string())
        })?;

        let heading = i18n::category_heading(category, lang);
        Ok(self.feed_page(articles, lang, Some(heading)).await)
    }

    /// One article with page metadata.
    ///
    /// Backend failures are reported as not found, the same as a missing id.
    pub async fn article_detail(&self, id: &ArticleId, lang: Language) -> Result<ArticlePage> {
        let article = match self.store.get_post(id).await {
            Ok(Some(article)) => article,
            Ok(None) => return Err(Error::NotFound(format!("article {}", id))),
            Err(e) => {
                tracing::warn!(%id, error = %e, "failed to load article, reporting as not found");
                return Err(Error::NotFound(format!("article {}", id)));
            }
        };

        let now = chrono::Utc::now().timestamp();
        Ok(ArticlePage {
            language: lang,
            meta: PageMeta::for_article(&article, &self.config.site.name),
            article: LocalizedArticle::new(&article, lang, now, Label::NewsUnknownDate),
        })
    }

    async fn feed_page(
        &self,
        articles: Vec<Article>,
        lang: Language,
        heading: Option<(String, String)>,
    ) -> FeedPage {
        let banner = self.feed_banner().await;
        let now = chrono::Utc::now().timestamp();
        let cards: Vec<LocalizedArticle> = articles
            .iter()
            .map(|article| LocalizedArticle::new(article, lang, now, Label::NewsRecently))
            .collect();
        let empty_message = cards
            .is_empty()
            .then(|| Label::NewsNoNews.text(lang).to_string());
        let (heading, subheading) = heading.unzip();

        FeedPage {
            language: lang,
            heading,
            subheading,
            items: assemble_feed(cards, banner.as_ref()),
            empty_message,
        }
    }

    /// Banner for the feed path; load failures mean no banner
    async fn feed_banner(&self) -> Option<BannerConfig> {
        match self.store.banner_config().await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load banner, showing feed without it");
                None
            }
        }
    }
}
