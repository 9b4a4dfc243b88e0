//! Reader pages: home feed, category feeds, article detail.

use super::CategoryInfo;
use crate::api::AppState;
use crate::api::preference::Preference;
use crate::error::{Error, Result};
use crate::types::{ArticleId, Category};
use crate::views::{ArticlePage, FeedPage};
use axum::{
    Json,
    extract::{Path, State},
};

/// GET /news - Home feed
#[utoipa::path(
    get,
    path = "/api/v1/news",
    tag = "news",
    params(
        ("lang" = Option<String>, Query, description = "Display language: ta or en")
    ),
    responses(
        (status = 200, description = "Latest articles with the banner merged in", body = FeedPage),
        (status = 503, description = "Feed could not be loaded", body = crate::error::ApiError)
    )
)]
pub async fn home_feed(
    State(state): State<AppState>,
    Preference(lang): Preference,
) -> Result<Json<FeedPage>> {
    Ok(Json(state.newsroom.home_feed(lang).await?))
}

/// GET /news/:id - Article detail
#[utoipa::path(
    get,
    path = "/api/v1/news/{id}",
    tag = "news",
    params(
        ("id" = String, Path, description = "Article id"),
        ("lang" = Option<String>, Query, description = "Display language: ta or en")
    ),
    responses(
        (status = 200, description = "Article with page metadata", body = ArticlePage),
        (status = 404, description = "Article not found", body = crate::error::ApiError)
    )
)]
pub async fn article_detail(
    State(state): State<AppState>,
    Preference(lang): Preference,
    Path(id): Path<String>,
) -> Result<Json<ArticlePage>> {
    let page = state
        .newsroom
        .article_detail(&ArticleId::new(id), lang)
        .await?;
    Ok(Json(page))
}

/// GET /categories - The four news categories
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "news",
    responses(
        (status = 200, description = "Categories with labels", body = Vec<CategoryInfo>)
    )
)]
pub async fn list_categories(Preference(lang): Preference) -> Json<Vec<CategoryInfo>> {
    Json(
        Category::ALL
            .iter()
            .map(|category| CategoryInfo {
                slug: *category,
                label: category.label().text(lang).to_string(),
            })
            .collect(),
    )
}

/// GET /categories/:slug - Category feed
#[utoipa::path(
    get,
    path = "/api/v1/categories/{slug}",
    tag = "news",
    params(
        ("slug" = String, Path, description = "sport, technology, political or cinema"),
        ("lang" = Option<String>, Query, description = "Display language: ta or en")
    ),
    responses(
        (status = 200, description = "Latest articles in the category", body = FeedPage),
        (status = 404, description = "Unknown category", body = crate::error::ApiError),
        (status = 503, description = "Feed could not be loaded", body = crate::error::ApiError)
    )
)]
pub async fn category_feed(
    State(state): State<AppState>,
    Preference(lang): Preference,
    Path(slug): Path<String>,
) -> Result<Json<FeedPage>> {
    let category: Category = slug
        .parse()
        .map_err(|_| Error::NotFound(format!("category {}", slug)))?;
    Ok(Json(state.newsroom.category_feed(category, lang).await?))
}
