//! OpenAPI documentation and schema generation
//!
//! The spec is generated at compile time with utoipa and served at
//! `/api/v1/openapi.json`; Swagger UI renders it at `/swagger-ui`.

use utoipa::OpenApi;

/// OpenAPI documentation for the realnews REST API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "realnews REST API",
        version = "0.1.0",
        description = "Bilingual Tamil/English news feeds, article pages and the admin console",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:6789", description = "Local development server")
    ),
    paths(
        // Reader
        crate::api::routes::home_feed,
        crate::api::routes::article_detail,
        crate::api::routes::list_categories,
        crate::api::routes::category_feed,

        // Locale
        crate::api::routes::get_labels,
        crate::api::routes::get_language,
        crate::api::routes::toggle_language,

        // Session
        crate::api::routes::login,
        crate::api::routes::logout,
        crate::api::routes::current_session,

        // Admin
        crate::api::routes::publish_post,
        crate::api::routes::list_posts,
        crate::api::routes::watch_posts,
        crate::api::routes::delete_post,
        crate::api::routes::get_banner,
        crate::api::routes::save_banner,
        crate::api::routes::watch_banner,
        crate::api::routes::event_stream,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(schemas(
        // Domain types
        crate::types::ArticleId,
        crate::types::Category,
        crate::types::Article,
        crate::types::Banner,
        crate::types::BannerConfig,
        crate::types::BannerStatus,
        crate::types::Event,
        crate::locale::Language,
        crate::locale::LocalizedArticle,

        // Page views
        crate::views::FeedPage,
        crate::views::PageMeta,
        crate::views::ArticlePage,
        crate::views::PostSummary,
        crate::views::BannerView,
        crate::newsroom::PostForm,

        // API request/response types
        crate::api::routes::CategoryInfo,
        crate::api::routes::LabelsResponse,
        crate::api::routes::LanguageResponse,
        crate::api::routes::LoginRequest,
        crate::api::routes::SessionResponse,
        crate::api::routes::SessionStatus,
        crate::api::routes::PublishedResponse,

        // Errors
        crate::error::ApiError,
        crate::error::ErrorDetail,
        crate::error::Resource,
    )),
    tags(
        (name = "news", description = "Reader feeds - Home page, category pages and article pages"),
        (name = "locale", description = "Locale - UI labels and the Tamil/English toggle"),
        (name = "session", description = "Session - Admin sign-in and sign-out"),
        (name = "admin", description = "Admin console - Publishing, post history, banner and live events"),
        (name = "system", description = "System endpoints - Health checks and the OpenAPI spec"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the bearer session scheme used by admin routes
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = &mut openapi.components {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            );
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_lists_reader_and_admin_paths() {
        let spec = ApiDoc::openapi();
        let paths = &spec.paths.paths;

        assert!(paths.contains_key("/api/v1/news"));
        assert!(paths.contains_key("/api/v1/news/{id}"));
        assert!(paths.contains_key("/api/v1/categories/{slug}"));
        assert!(paths.contains_key("/api/v1/admin/posts"));
        assert!(paths.contains_key("/api/v1/admin/ads/live"));
    }

    #[test]
    fn spec_has_schemas_and_tags() {
        let spec = ApiDoc::openapi();

        let components = spec.components.unwrap();
        assert!(components.schemas.contains_key("FeedPage"));
        assert!(components.schemas.contains_key("ApiError"));
        assert!(components.security_schemes.contains_key("bearer"));

        let tags = spec.tags.unwrap();
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert!(names.contains(&"news"));
        assert!(names.contains(&"admin"));
    }

    #[test]
    fn spec_serializes_as_openapi_3() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();

        assert_eq!(json["info"]["title"], "realnews REST API");
        assert!(json["openapi"].as_str().unwrap().starts_with("3."));
    }
}
