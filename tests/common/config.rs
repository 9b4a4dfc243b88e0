//! Test configuration helpers: a newsroom rooted in a temp dir

use std::sync::Arc;
use tempfile::TempDir;
use realnews::config::AccountConfig;
use realnews::{Config, Newsroom};

/// Editor account bootstrapped into every test newsroom
pub const EDITOR_EMAIL: &str = "editor@example.com";
/// Password of [`EDITOR_EMAIL`]
pub const EDITOR_PASSWORD: &str = "correct horse";

/// Configuration with the database and media directory under `dir`
pub fn test_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.persistence.database_path = dir.path().join("realnews.db");
    config.persistence.media_dir = dir.path().join("media");
    config.site.public_base_url = "http://news.test".to_string();
    config.server.api.bind_address = "127.0.0.1:0".parse().unwrap();
    config.auth.accounts = vec![AccountConfig {
        email: EDITOR_EMAIL.to_string(),
        password: EDITOR_PASSWORD.to_string(),
        can_publish: true,
    }];
    config
}

/// A newsroom over a fresh temp dir; keep the dir alive for the test
pub async fn create_test_newsroom() -> (Arc<Newsroom>, Arc<Config>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    let newsroom = Newsroom::new(config.clone()).await.unwrap();
    (Arc::new(newsroom), Arc::new(config), dir)
}
