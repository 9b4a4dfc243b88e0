//! REST API server module
//!
//! Serves the reader feeds, the admin console operations and the uploaded
//! media over HTTP, with an OpenAPI 3.1 description of every route.

use crate::{Config, Newsroom, Result};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post},
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod auth;
pub mod error_response;
pub mod openapi;
pub mod preference;
pub mod rate_limit;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Prefix every API route is nested under
pub const API_PREFIX: &str = "/api/v1";

/// Extra request body allowance on top of the image size cap, for the text fields
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Create the router with all route definitions
///
/// # Routes (under `/api/v1`)
///
/// ## Reader
/// - `GET /news` - Home feed
/// - `GET /news/:id` - Article page
/// - `GET /categories` - Category list
/// - `GET /categories/:slug` - Category feed
/// - `GET /labels` - UI labels
/// - `GET /language` - Current language
/// - `POST /language/toggle` - Switch language
///
/// ## Session
/// - `POST /session/login`, `POST /session/logout`, `GET /session`
///
/// ## Admin (bearer session required)
/// - `POST /admin/posts` - Publish (multipart)
/// - `GET /admin/posts` - Post history
/// - `GET /admin/posts/live` - Post history stream
/// - `DELETE /admin/posts/:id` - Delete
/// - `GET /admin/ads`, `PUT /admin/ads` - Banner configuration
/// - `GET /admin/ads/live` - Banner stream
/// - `GET /admin/events` - Newsroom event stream
///
/// ## System
/// - `GET /health`, `GET /openapi.json`
///
/// Uploaded images are served from `/media`, and Swagger UI from
/// `/swagger-ui` when enabled.
pub fn create_router(newsroom: Arc<Newsroom>, config: Arc<Config>) -> Router {
    let state = AppState::new(newsroom, config.clone());

    let body_limit = config.upload.max_image_bytes + FORM_OVERHEAD_BYTES;
    let admin = Router::new()
        .route(
            "/admin/posts",
            get(routes::list_posts)
                .post(routes::publish_post)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/admin/posts/live", get(routes::watch_posts))
        .route("/admin/posts/:id", delete(routes::delete_post))
        .route(
            "/admin/ads",
            get(routes::get_banner).put(routes::save_banner),
        )
        .route("/admin/ads/live", get(routes::watch_banner))
        .route("/admin/events", get(routes::event_stream))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    let api = Router::new()
        // Reader
        .route("/news", get(routes::home_feed))
        .route("/news/:id", get(routes::article_detail))
        .route("/categories", get(routes::list_categories))
        .route("/categories/:slug", get(routes::category_feed))
        .route("/labels", get(routes::get_labels))
        .route("/language", get(routes::get_language))
        .route("/language/toggle", post(routes::toggle_language))
        // Session
        .route("/session", get(routes::current_session))
        .route("/session/login", post(routes::login))
        .route("/session/logout", post(routes::logout))
        // System
        .route("/health", get(routes::health_check))
        .route("/openapi.json", get(routes::openapi_spec))
        .merge(admin);

    let router = Router::new()
        .nest(API_PREFIX, api)
        .nest_service("/media", ServeDir::new(&config.persistence.media_dir));

    let router = if config.server.api.swagger_ui {
        router.merge(SwaggerUi::new("/swagger-ui").url("/api/v1/openapi.json", ApiDoc::openapi()))
    } else {
        router
    };

    let router = router.with_state(state);

    // The last layer applied is the outermost: Trace → CORS → Rate Limit → Handler
    let router = if config.server.api.rate_limit.enabled {
        let limiter = Arc::new(rate_limit::RateLimiter::new(
            config.server.api.rate_limit.clone(),
        ));
        router.layer(middleware::from_fn_with_state(
            limiter,
            rate_limit::rate_limit_middleware,
        ))
    } else {
        router
    };

    let router = if config.server.api.cors_enabled {
        router.layer(build_cors_layer(&config.server.api.cors_origins))
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http())
}

/// Build a CORS layer for the configured origins ("*" or empty allows any)
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_any = origins.iter().any(|o| o == "*");

    if allow_any || origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Serve the API on the configured bind address until `shutdown` resolves.
///
/// # Example
///
/// ```no_run
/// use realnews::{Config, Newsroom};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Arc::new(Config::default());
/// let newsroom = Arc::new(Newsroom::new((*config).clone()).await?);
///
/// realnews::api::start_api_server(newsroom, config, realnews::wait_for_signal()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server<F>(
    newsroom: Arc<Newsroom>,
    config: Arc<Config>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let bind_address = config.server.api.bind_address;
    let app = create_router(newsroom, config);

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    tracing::info!(address = %bind_address, "API server listening");

    // ConnectInfo<SocketAddr> feeds the rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
