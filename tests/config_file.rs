//! Loading configuration from TOML files.

use realnews::{Config, Error, Language};
use std::io::Write;
use std::time::Duration;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let config = Config::load(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.feed.home_limit, 10);
    assert_eq!(config.feed.category_limit, 20);
    assert_eq!(config.upload.timeout, Duration::from_secs(30));
}

#[test]
fn file_overrides_selected_sections() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[site]
name = "Chennai Daily"
default_language = "ta"

[feed]
home_limit = 6

[upload]
timeout = 45

[[auth.accounts]]
email = "desk@example.com"
password = "s3cret"
"#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.site.name, "Chennai Daily");
    assert_eq!(config.site.default_language, Language::Tamil);
    assert_eq!(config.feed.home_limit, 6);
    assert_eq!(config.feed.category_limit, 20);
    assert_eq!(config.upload.timeout, Duration::from_secs(45));
    assert_eq!(config.auth.accounts.len(), 1);
    assert!(config.auth.accounts[0].can_publish);
}

#[test]
fn zero_limit_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[feed]\nhome_limit = 0").unwrap();

    match Config::load(file.path()) {
        Err(Error::Config { key, .. }) => assert_eq!(key.as_deref(), Some("feed.home_limit")),
        other => panic!("expected config error, got {:?}", other.map(|_| ())),
    }
}
