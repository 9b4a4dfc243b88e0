//! # realnews
//!
//! A bilingual (Tamil/English) news site: reader feeds and article pages,
//! plus an admin console for publishing articles and running a promotional
//! banner.
//!
//! ## Overview
//!
//! - **Reader** - home and category feeds with the banner merged in after
//!   the third article, article pages with share metadata, and a per-reader
//!   language preference.
//! - **Admin** - sign-in, publishing with an image upload under a deadline,
//!   deleting, post history and banner settings, with live updates.
//! - **HTTP** - everything above is served by an axum router under
//!   `/api/v1`, described by an OpenAPI document.
//!
//! ## Quick Start
//!
//! ```no_run
//! use realnews::{Config, Newsroom, locale::Language};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let newsroom = Newsroom::new(Config::default()).await?;
//!
//!     let page = newsroom.home_feed(Language::Tamil).await?;
//!     println!("{} articles", page.article_count());
//!
//!     let mut events = newsroom.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Banner injection into feeds
pub mod assembly;
/// Admin accounts and sessions
pub mod auth;
/// Collaborator traits: document store, auth provider, blob storage
pub mod backend;
/// Configuration types
pub mod config;
/// Database persistence layer
pub mod db;
/// Error types
pub mod error;
/// Feed loading with the missing-index fallback
pub mod feed;
/// UI labels in both languages
pub mod i18n;
/// Language preference and text selection
pub mod locale;
/// Site operations (decomposed into focused submodules)
pub mod newsroom;
/// Local image storage
pub mod storage;
/// Live snapshot subscriptions
pub mod subscription;
/// Core types and events
pub mod types;
/// Video link normalization
pub mod video;
/// Page view models
pub mod views;

// Re-export commonly used types
pub use config::Config;
pub use db::Database;
pub use error::{ApiError, DatabaseError, Error, ErrorDetail, Result, ToHttpStatus};
pub use locale::Language;
pub use newsroom::Newsroom;
pub use types::{Article, ArticleId, Banner, BannerConfig, Category, Event};

/// Serve the API until a termination signal arrives, then shut down
/// gracefully.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use realnews::{Config, Newsroom, run_with_shutdown};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Arc::new(Config::default());
///     let newsroom = Arc::new(Newsroom::new((*config).clone()).await?);
///
///     run_with_shutdown(newsroom, config).await?;
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown(
    newsroom: std::sync::Arc<Newsroom>,
    config: std::sync::Arc<Config>,
) -> Result<()> {
    api::start_api_server(newsroom, config, wait_for_signal()).await?;
    tracing::info!("shutdown complete");
    Ok(())
}

/// Resolve once the process is asked to stop
#[cfg(unix)]
pub async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Registration can fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("received SIGTERM");
                }
                _ = sigint.recv() => {
                    tracing::info!("received SIGINT");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("received SIGINT");
            } else {
                tracing::error!("could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("received SIGTERM");
            } else {
                tracing::error!("could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

/// Resolve once the process is asked to stop
#[cfg(not(unix))]
pub async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("received Ctrl+C");
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
        }
    }
}
