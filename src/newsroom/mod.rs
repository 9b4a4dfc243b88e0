//! The news site's operations, split into focused submodules.
//!
//! The `Newsroom` struct and its methods are organized by audience:
//! - [`reader`] - Home feed, category feeds and article pages
//! - [`admin`] - Publishing, deleting, post history and the banner
//! - [`session`] - Admin sign-in and sign-out

mod admin;
mod reader;
mod session;


pub use admin::{ImageUpload, PostForm, REQUIRED_FIELDS_MESSAGE};
pub use reader::{CATEGORY_FEED_FAILED_MESSAGE, HOME_FEED_FAILED_MESSAGE};

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::auth::Authenticator;
use crate::backend::{AuthProvider, BlobStorage, DocumentStore};
use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::storage::LocalBlobStorage;
use crate::types::Event;

/// Capacity of the event channel
const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// Main site instance (cloneable - all fields are Arc-wrapped)
#[derive(Clone)]
pub struct Newsroom {
    /// Document store holding posts and the banner
    pub(crate) store: Arc<dyn DocumentStore>,
    /// Admin authentication
    pub(crate) auth: Arc<dyn AuthProvider>,
    /// Image storage
    pub(crate) storage: Arc<dyn BlobStorage>,
    /// Configuration
    pub(crate) config: Arc<Config>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: broadcast::Sender<Event>,
}

impl Newsroom {
    /// Open the database, provision indexes and accounts, and prepare the
    /// media directory.
    pub async fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let db = Arc::new(Database::new(&config.persistence.database_path).await?);
        if config.persistence.provision_indexes {
            db.provision_indexes().await?;
        } else {
            tracing::warn!("feed index provisioning disabled, category pages will sort in memory");
        }

        let storage = LocalBlobStorage::new(
            config.persistence.media_dir.clone(),
            config.site.public_base_url.clone(),
        );
        storage.ensure_root().await?;

        let (event_tx, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let auth = Authenticator::new(db.clone(), config.auth.session_ttl, event_tx.clone());
        auth.bootstrap_accounts(&config.auth.accounts).await?;

        tracing::info!(
            database = %config.persistence.database_path.display(),
            media = %config.persistence.media_dir.display(),
            "newsroom ready"
        );

        Ok(Self {
            store: db,
            auth: Arc::new(auth),
            storage: Arc::new(storage),
            config: Arc::new(config),
            event_tx,
        })
    }

    /// Assemble a newsroom from explicit collaborators
    pub fn from_parts(
        store: Arc<dyn DocumentStore>,
        auth: Arc<dyn AuthProvider>,
        storage: Arc<dyn BlobStorage>,
        config: Config,
        event_tx: broadcast::Sender<Event>,
    ) -> Self {
        Self {
            store,
            auth,
            storage,
            config: Arc::new(config),
            event_tx,
        }
    }

    /// Subscribe to newsroom events
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Active configuration
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    fn emit(&self, event: Event) {
        // No receivers is fine: nobody is listening
        let _ = self.event_tx.send(event);
    }
}
