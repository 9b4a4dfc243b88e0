//! Configuration types for realnews

use crate::error::{Error, Result};
use crate::locale::Language;
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path, path::PathBuf, time::Duration};
use utoipa::ToSchema;

/// Site identity and reader defaults
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SiteConfig {
    /// Site name used in page titles (default: "7RealNews")
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Language shown to readers without a stored preference (default: "en")
    #[serde(default)]
    pub default_language: Language,

    /// Base URL under which uploaded media is reachable
    /// (default: "http://127.0.0.1:6789")
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            default_language: Language::default(),
            public_base_url: default_public_base_url(),
        }
    }
}

/// Feed page sizes
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct FeedConfig {
    /// Articles on the home page (default: 10)
    #[serde(default = "default_home_limit")]
    pub home_limit: usize,

    /// Articles on a category page (default: 20)
    #[serde(default = "default_category_limit")]
    pub category_limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            home_limit: default_home_limit(),
            category_limit: default_category_limit(),
        }
    }
}

/// Image upload limits
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadConfig {
    /// Upload deadline, enforced by the newsroom (default: 30 seconds)
    #[serde(default = "default_upload_timeout", with = "duration_serde")]
    #[schema(value_type = u64)]
    pub timeout: Duration,

    /// Largest accepted image in bytes (default: 10 MiB)
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            timeout: default_upload_timeout(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

/// Admin account provisioned at startup
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountConfig {
    /// Login email
    pub email: String,

    /// Login password (stored salted and hashed)
    pub password: String,

    /// Whether this account may write posts, banners and images (default: true)
    #[serde(default = "default_true")]
    pub can_publish: bool,
}

impl std::fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountConfig")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("can_publish", &self.can_publish)
            .finish()
    }
}

/// Admin authentication settings
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthConfig {
    /// Accounts to create or update on startup
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,

    /// How long a session stays valid (default: 7 days)
    #[serde(default = "default_session_ttl", with = "duration_serde")]
    #[schema(value_type = u64)]
    pub session_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            accounts: vec![],
            session_ttl: default_session_ttl(),
        }
    }
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PersistenceConfig {
    /// Database path (default: "./realnews.db")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Directory holding uploaded images (default: "./media")
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,

    /// Create the compound (category, created_at) index on startup
    /// (default: true). Without it category pages use the in-memory sort.
    #[serde(default = "default_true")]
    pub provision_indexes: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            media_dir: default_media_dir(),
            provision_indexes: true,
        }
    }
}

/// API and external server integration configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ServerIntegrationConfig {
    /// REST API configuration
    #[serde(default)]
    pub api: ApiConfig,
}

/// REST API configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiConfig {
    /// Address to bind to (default: 127.0.0.1:6789)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

/// Rate limiting configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RateLimitConfig {
    /// Enable rate limiting (default: false)
    #[serde(default)]
    pub enabled: bool,

    /// Requests per second per IP (default: 100)
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Burst size (default: 200)
    #[serde(default = "default_burst_size")]
    pub burst_size: u32,

    /// Endpoints exempt from rate limiting
    #[serde(default = "default_exempt_paths")]
    pub exempt_paths: Vec<String>,

    /// IPs exempt from rate limiting (e.g., localhost)
    #[serde(default = "default_exempt_ips")]
    pub exempt_ips: Vec<std::net::IpAddr>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            requests_per_second: default_requests_per_second(),
            burst_size: default_burst_size(),
            exempt_paths: default_exempt_paths(),
            exempt_ips: default_exempt_ips(),
        }
    }
}

/// Main configuration for realnews
///
/// Each section maps to a TOML table of the same name:
/// - [`site`](SiteConfig): name, default language, public URL
/// - [`feed`](FeedConfig): page sizes
/// - [`upload`](UploadConfig): image upload deadline and size cap
/// - [`auth`](AuthConfig): bootstrap accounts and session lifetime
/// - [`persistence`](PersistenceConfig): database, media directory, indexes
/// - [`server`](ServerIntegrationConfig): REST API
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// Site identity
    #[serde(default)]
    pub site: SiteConfig,

    /// Feed page sizes
    #[serde(default)]
    pub feed: FeedConfig,

    /// Upload limits
    #[serde(default)]
    pub upload: UploadConfig,

    /// Admin authentication
    #[serde(default)]
    pub auth: AuthConfig,

    /// Data storage
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// API and external server integration
    #[serde(default)]
    pub server: ServerIntegrationConfig,
}

impl Config {
    /// Load configuration from a TOML file. A missing file yields the
    /// defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let config: Config = toml::from_str(&text).map_err(|e| Error::Config {
            message: format!("invalid config file {}: {}", path.display(), e),
            key: None,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.feed.home_limit == 0 {
            return Err(invalid("feed.home_limit", "must be at least 1"));
        }
        if self.feed.category_limit == 0 {
            return Err(invalid("feed.category_limit", "must be at least 1"));
        }
        if self.upload.timeout.is_zero() {
            return Err(invalid("upload.timeout", "must be at least 1 second"));
        }
        if self.upload.max_image_bytes == 0 {
            return Err(invalid("upload.max_image_bytes", "must be at least 1"));
        }
        if self.auth.session_ttl.is_zero() {
            return Err(invalid("auth.session_ttl", "must be at least 1 second"));
        }
        if url::Url::parse(&self.site.public_base_url).is_err() {
            return Err(invalid("site.public_base_url", "must be an absolute URL"));
        }
        if let Some(account) = self
            .auth
            .accounts
            .iter()
            .find(|a| a.email.trim().is_empty() || a.password.is_empty())
        {
            return Err(invalid(
                "auth.accounts",
                &format!("account '{}' needs an email and a password", account.email),
            ));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> Error {
    Error::Config {
        message: format!("{} {}", key, reason),
        key: Some(key.to_string()),
    }
}

fn default_site_name() -> String {
    "7RealNews".to_string()
}

fn default_public_base_url() -> String {
    "http://127.0.0.1:6789".to_string()
}

fn default_home_limit() -> usize {
    10
}

fn default_category_limit() -> usize {
    20
}

fn default_upload_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_max_image_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_session_ttl() -> Duration {
    Duration::from_secs(7 * 24 * 60 * 60)
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./realnews.db")
}

fn default_media_dir() -> PathBuf {
    PathBuf::from("./media")
}

fn default_true() -> bool {
    true
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 6789))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".into()]
}

fn default_requests_per_second() -> u32 {
    100
}

fn default_burst_size() -> u32 {
    200
}

fn default_exempt_paths() -> Vec<String> {
    vec![
        "/api/v1/admin/events".to_string(), // SSE is long-lived
        "/api/v1/admin/posts/live".to_string(),
        "/api/v1/admin/ads/live".to_string(),
        "/api/v1/health".to_string(), // Health checks should always work
    ]
}

fn default_exempt_ips() -> Vec<std::net::IpAddr> {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
    vec![
        IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(Ipv6Addr::LOCALHOST),
    ]
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_site_behavior() {
        let config = Config::default();

        assert_eq!(config.site.name, "7RealNews");
        assert_eq!(config.site.default_language, Language::English);
        assert_eq!(config.feed.home_limit, 10);
        assert_eq!(config.feed.category_limit, 20);
        assert_eq!(config.upload.timeout, Duration::from_secs(30));
        assert!(config.persistence.provision_indexes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.feed.home_limit, 10);
        assert_eq!(config.server.api.bind_address, default_bind_address());
    }

    #[test]
    fn toml_sections_override_defaults() {
        let text = r#"
            [site]
            name = "Test News"
            default_language = "ta"

            [feed]
            category_limit = 5

            [upload]
            timeout = 3

            [[auth.accounts]]
            email = "editor@example.com"
            password = "secret"

            [server.api]
            bind_address = "0.0.0.0:8080"
        "#;

        let config: Config = toml::from_str(text).unwrap();

        assert_eq!(config.site.name, "Test News");
        assert_eq!(config.site.default_language, Language::Tamil);
        assert_eq!(config.feed.category_limit, 5);
        assert_eq!(config.feed.home_limit, 10, "unset keys keep defaults");
        assert_eq!(config.upload.timeout, Duration::from_secs(3));
        assert_eq!(config.auth.accounts.len(), 1);
        assert!(config.auth.accounts[0].can_publish);
        assert_eq!(config.server.api.bind_address.port(), 8080);
    }

    #[test]
    fn duration_serde_serializes_as_seconds() {
        let config = UploadConfig {
            timeout: Duration::from_secs(45),
            ..UploadConfig::default()
        };

        let json = serde_json::to_value(&config).expect("serialize failed");

        assert_eq!(
            json["timeout"], 45,
            "duration_serde must serialize Duration as integer seconds"
        );
    }

    #[test]
    fn duration_serde_rejects_negative_integer() {
        let result: std::result::Result<UploadConfig, _> =
            serde_json::from_str(r#"{"timeout": -1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_zero_limits() {
        let mut config = Config::default();
        config.feed.home_limit = 0;

        match config.validate() {
            Err(Error::Config { key, .. }) => assert_eq!(key.as_deref(), Some("feed.home_limit")),
            other => panic!("expected config error, got {:?}", other),
        }

        let mut config = Config::default();
        config.upload.timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_accounts_without_password() {
        let mut config = Config::default();
        config.auth.accounts.push(AccountConfig {
            email: "editor@example.com".into(),
            password: String::new(),
            can_publish: true,
        });

        assert!(config.validate().is_err());
    }

    #[test]
    fn account_debug_redacts_password() {
        let account = AccountConfig {
            email: "editor@example.com".into(),
            password: "hunter2".into(),
            can_publish: true,
        };
        let debug = format!("{:?}", account);
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.site.name, "7RealNews");
    }

    #[test]
    fn load_reports_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[feed]\nhome_limit = \"many\"").unwrap();

        assert!(matches!(
            Config::load(file.path()),
            Err(Error::Config { .. })
        ));
    }
}
