//! Reader language preference and per-field text selection
//!
//! Articles carry parallel Tamil (primary) and English (secondary) fields.
//! Title and body are resolved independently: an article may show an English
//! title above a Tamil body when only the English title was filled in.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{Error, Result};
use crate::i18n::{self, Label};
use crate::types::{Article, ArticleId, Category};
use crate::video;

/// Reader's display language
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Language {
    /// Tamil, the primary language of every article
    #[serde(rename = "ta")]
    Tamil,
    /// English, the secondary language
    #[default]
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Short code used in cookies and query strings
    pub fn code(&self) -> &'static str {
        match self {
            Language::Tamil => "ta",
            Language::English => "en",
        }
    }

    /// The other language
    pub fn toggled(&self) -> Self {
        match self {
            Language::Tamil => Language::English,
            Language::English => Language::Tamil,
        }
    }

    /// Whether this is the articles' secondary language
    pub fn is_secondary(&self) -> bool {
        matches!(self, Language::English)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ta" => Ok(Language::Tamil),
            "en" => Ok(Language::English),
            other => Err(Error::Validation(format!("unknown language '{}'", other))),
        }
    }
}

/// Pick the secondary text when the reader prefers the secondary language and
/// it is present and non-empty; otherwise the primary text.
pub fn select_text<'a>(lang: Language, primary: &'a str, secondary: Option<&'a str>) -> &'a str {
    match secondary {
        Some(text) if lang.is_secondary() && !text.is_empty() => text,
        _ => primary,
    }
}

/// Title to display for `article`
pub fn display_title(lang: Language, article: &Article) -> &str {
    select_text(lang, &article.title, article.english_title.as_deref())
}

/// Body to display for `article`
pub fn display_content(lang: Language, article: &Article) -> &str {
    select_text(lang, &article.content, article.english_content.as_deref())
}

const EXCERPT_CHARS: usize = 100;

/// First `EXCERPT_CHARS` characters, with an ellipsis when cut
pub fn excerpt(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Article as shown to a reader in one language
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocalizedArticle {
    /// Article id
    pub id: ArticleId,
    /// Resolved title
    pub title: String,
    /// Resolved body
    pub content: String,
    /// Share/card excerpt of the resolved body
    pub excerpt: String,
    /// Image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Embeddable player URL for the article's video
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_embed_url: Option<String>,
    /// Category
    pub category: Category,
    /// Localized category label
    pub category_label: String,
    /// Creation time (seconds since epoch)
    pub created_at: Option<i64>,
    /// Relative "posted" label
    pub posted: String,
    /// View counter
    pub views: u64,
}

impl LocalizedArticle {
    /// Resolve `article` for `lang`. `undated` is shown when the article has
    /// no creation time.
    pub fn new(article: &Article, lang: Language, now: i64, undated: Label) -> Self {
        let content = display_content(lang, article).to_string();
        Self {
            id: article.id.clone(),
            title: display_title(lang, article).to_string(),
            excerpt: excerpt(&content),
            content,
            image_url: article.image_url.clone().filter(|url| !url.is_empty()),
            video_embed_url: article
                .video_link
                .as_deref()
                .filter(|link| !link.is_empty())
                .map(video::embed_url),
            category: article.category,
            category_label: article.category.label().text(lang).to_string(),
            created_at: article.created_at,
            posted: i18n::posted_ago(article.created_at, now, lang, undated),
            views: article.views.unwrap_or(0),
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn article(english_title: Option<&str>, english_content: Option<&str>) -> Article {
        Article {
            id: ArticleId::new("a1"),
            title: "தலைப்பு".into(),
            english_title: english_title.map(Into::into),
            content: "உள்ளடக்கம்".into(),
            english_content: english_content.map(Into::into),
            image_url: None,
            video_link: None,
            category: Category::Sport,
            created_at: None,
            views: None,
        }
    }

    #[test]
    fn secondary_preference_with_text_selects_secondary() {
        let a = article(Some("Headline"), Some("Body"));
        assert_eq!(display_title(Language::English, &a), "Headline");
        assert_eq!(display_content(Language::English, &a), "Body");
    }

    #[test]
    fn secondary_preference_with_empty_text_falls_back_to_primary() {
        let a = article(Some(""), Some(""));
        assert_eq!(display_title(Language::English, &a), "தலைப்பு");
        assert_eq!(display_content(Language::English, &a), "உள்ளடக்கம்");
    }

    #[test]
    fn secondary_preference_with_absent_text_falls_back_to_primary() {
        let a = article(None, None);
        assert_eq!(display_title(Language::English, &a), "தலைப்பு");
        assert_eq!(display_content(Language::English, &a), "உள்ளடக்கம்");
    }

    #[test]
    fn primary_preference_always_selects_primary() {
        let a = article(Some("Headline"), Some("Body"));
        assert_eq!(display_title(Language::Tamil, &a), "தலைப்பு");
        assert_eq!(display_content(Language::Tamil, &a), "உள்ளடக்கம்");
    }

    #[test]
    fn title_and_body_resolve_independently() {
        let a = article(Some("Headline"), None);
        assert_eq!(display_title(Language::English, &a), "Headline");
        assert_eq!(display_content(Language::English, &a), "உள்ளடக்கம்");
    }

    #[test]
    fn language_codes_round_trip_and_toggle() {
        assert_eq!("ta".parse::<Language>().unwrap(), Language::Tamil);
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert!("fr".parse::<Language>().is_err());
        assert_eq!(Language::English.toggled(), Language::Tamil);
        assert_eq!(Language::default(), Language::English);
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        let tamil = "அ".repeat(150);
        let cut = excerpt(&tamil);
        assert_eq!(cut.chars().count(), EXCERPT_CHARS + 3);
        assert!(cut.ends_with("..."));

        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn localized_article_embeds_video_and_labels_category() {
        let mut a = article(Some("Headline"), None);
        a.video_link = Some("https://youtu.be/xyz".into());
        a.image_url = Some(String::new());
        a.created_at = Some(1_000);

        let view = LocalizedArticle::new(&a, Language::English, 1_000 + 120, Label::NewsRecently);

        assert_eq!(view.title, "Headline");
        assert_eq!(view.content, "உள்ளடக்கம்");
        assert_eq!(
            view.video_embed_url.as_deref(),
            Some("https://www.youtube.com/embed/xyz")
        );
        assert_eq!(view.image_url, None, "empty image reference is dropped");
        assert_eq!(view.category_label, "Sport");
        assert_eq!(view.posted, "2 minutes ago");
        assert_eq!(view.views, 0);
    }
}
