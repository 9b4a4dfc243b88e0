//! Response views returned by the newsroom and the REST API

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::assembly::FeedItem;
use crate::i18n::{self, Label};
use crate::locale::{Language, LocalizedArticle};
use crate::types::{Article, ArticleId, BannerConfig, BannerStatus, Category};

/// Characters of body text used for the page description
pub const META_DESCRIPTION_CHARS: usize = 160;

/// Share image used when an article has none
pub const DEFAULT_OG_IMAGE: &str = "/default-og.png";

/// A feed page: articles with the banner merged in
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct FeedPage {
    /// Language the page was rendered in
    pub language: Language,

    /// Page heading (category pages only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,

    /// Page sub-heading (category pages only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subheading: Option<String>,

    /// Articles and at most one banner, tagged by `kind`
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<FeedItem<LocalizedArticle>>,

    /// Shown instead of the list when there are no articles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

impl FeedPage {
    /// Number of articles on the page, not counting the banner
    pub fn article_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_banner()).count()
    }
}

/// Document metadata for an article page
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    /// `<title>`
    pub title: String,
    /// Meta description
    pub description: String,
    /// Open Graph image
    pub image: String,
}

impl PageMeta {
    /// Metadata for `article` on a site called `site_name`.
    ///
    /// The title prefers the English title when one was entered; the
    /// description always comes from the Tamil body.
    pub fn for_article(article: &Article, site_name: &str) -> Self {
        let headline = article
            .english_title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&article.title);
        Self {
            title: format!("{} | {}", headline, site_name),
            description: article.content.chars().take(META_DESCRIPTION_CHARS).collect(),
            image: article
                .image_url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_OG_IMAGE.to_string()),
        }
    }
}

/// An article page
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ArticlePage {
    /// Language the page was rendered in
    pub language: Language,
    /// The article
    pub article: LocalizedArticle,
    /// Document metadata
    pub meta: PageMeta,
}

/// Row of the admin post history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PostSummary {
    /// Article id
    pub id: ArticleId,
    /// Tamil title
    pub title: String,
    /// English title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english_title: Option<String>,
    /// Category
    pub category: Category,
    /// Creation time (seconds since epoch)
    pub created_at: Option<i64>,
    /// Relative "posted" label
    pub posted: String,
    /// View counter
    pub views: u64,
}

impl PostSummary {
    /// Summary of `article`; undated posts show as just published
    pub fn new(article: &Article, lang: Language, now: i64) -> Self {
        Self {
            id: article.id.clone(),
            title: article.title.clone(),
            english_title: article.english_title.clone(),
            category: article.category,
            created_at: article.created_at,
            posted: i18n::posted_ago(article.created_at, now, lang, Label::NewsJustNow),
            views: article.views.unwrap_or(0),
        }
    }
}

/// Banner configuration as shown in the admin console
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BannerView {
    /// Stored configuration
    pub config: BannerConfig,
    /// Display status
    pub status: BannerStatus,
    /// End of the banner's run (seconds since epoch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl BannerView {
    /// View of `config` at `now`
    pub fn new(config: BannerConfig, now: i64) -> Self {
        Self {
            status: config.status(now),
            expires_at: config.expires_at(),
            config,
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        Article {
            id: ArticleId::new("a1"),
            title: "தமிழ் தலைப்பு".into(),
            english_title: Some("English headline".into()),
            content: "க".repeat(200),
            english_content: None,
            image_url: None,
            video_link: None,
            category: Category::Cinema,
            created_at: None,
            views: Some(12),
        }
    }

    #[test]
    fn meta_prefers_english_title_and_default_image() {
        let meta = PageMeta::for_article(&article(), "7RealNews");

        assert_eq!(meta.title, "English headline | 7RealNews");
        assert_eq!(meta.description.chars().count(), META_DESCRIPTION_CHARS);
        assert_eq!(meta.image, DEFAULT_OG_IMAGE);
    }

    #[test]
    fn meta_falls_back_to_tamil_title_and_uses_image() {
        let mut a = article();
        a.english_title = Some(String::new());
        a.image_url = Some("https://cdn.example.com/a.jpg".into());

        let meta = PageMeta::for_article(&a, "7RealNews");

        assert_eq!(meta.title, "தமிழ் தலைப்பு | 7RealNews");
        assert_eq!(meta.image, "https://cdn.example.com/a.jpg");
    }

    #[test]
    fn undated_post_summary_reads_just_now() {
        let summary = PostSummary::new(&article(), Language::English, 1_000);
        assert_eq!(summary.posted, "Just now");
        assert_eq!(summary.views, 12);
    }
}
