//! Feed assembly: merging the promotional banner into an article list

use serde::{Deserialize, Serialize};

use crate::types::{Banner, BannerConfig};

/// Zero-based position the banner takes in an assembled feed
pub const BANNER_SLOT: usize = 3;

/// One renderable feed element
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedItem<A> {
    /// An article
    Article(A),
    /// The promotional banner
    Banner(Banner),
}

impl<A> FeedItem<A> {
    /// Whether this item is the banner
    pub fn is_banner(&self) -> bool {
        matches!(self, FeedItem::Banner(_))
    }

    /// The article, if this item is one
    pub fn as_article(&self) -> Option<&A> {
        match self {
            FeedItem::Article(article) => Some(article),
            FeedItem::Banner(_) => None,
        }
    }
}

/// Build the display sequence for `articles`.
///
/// When `banner` is enabled and there are more than [`BANNER_SLOT`] articles,
/// the banner is inserted once immediately before the fourth article. In every
/// other case the articles are returned unchanged, in their original order.
pub fn assemble_feed<A>(articles: Vec<A>, banner: Option<&BannerConfig>) -> Vec<FeedItem<A>> {
    let active = banner.and_then(BannerConfig::active);
    let inject = active.is_some() && articles.len() > BANNER_SLOT;

    let mut items = Vec::with_capacity(articles.len() + usize::from(inject));
    for (index, article) in articles.into_iter().enumerate() {
        if inject && index == BANNER_SLOT
            && let Some(banner) = active
        {
            items.push(FeedItem::Banner(banner.clone()));
        }
        items.push(FeedItem::Article(article));
    }
    items
}
