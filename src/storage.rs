//! Filesystem blob storage for uploaded images
//!
//! Objects live under a root directory and are served by the API at
//! `/media/<key>`.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::backend::{BlobStorage, authorize_write};
use crate::error::{Error, Resource, Result};
use crate::types::{Actor, StoredObject, UploadProgress};

/// Bytes written between progress reports
pub const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Key prefix for article images
const NEWS_PREFIX: &str = "news";

/// Object key for an uploaded article image: `news/{millis}_{file name}`.
///
/// Characters outside `[A-Za-z0-9._-]` are replaced with `_`.
pub fn object_key(file_name: &str, millis: i64) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let mut sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.trim_matches('.').is_empty() {
        sanitized = "image".to_string();
    }
    format!("{}/{}_{}", NEWS_PREFIX, millis, sanitized)
}

/// Blob storage rooted at a local directory
#[derive(Clone, Debug)]
pub struct LocalBlobStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStorage {
    /// Storage under `root`, with download URLs built from `public_base_url`
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if it does not exist
    pub async fn ensure_root(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Resolve `key` below the root, refusing anything that could escape it
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let safe = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(Error::Validation(format!("invalid object key '{}'", key)));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStorage for LocalBlobStorage {
    async fn upload(
        &self,
        actor: &Actor,
        key: &str,
        data: &[u8],
        on_progress: &(dyn Fn(UploadProgress) + Send + Sync),
    ) -> Result<StoredObject> {
        authorize_write(actor, Resource::Storage)?;
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let total_bytes = data.len() as u64;
        let mut file = tokio::fs::File::create(&path).await?;
        let mut bytes_transferred = 0u64;

        on_progress(UploadProgress {
            key: key.to_string(),
            bytes_transferred,
            total_bytes,
        });

        for chunk in data.chunks(UPLOAD_CHUNK_SIZE) {
            file.write_all(chunk).await?;
            bytes_transferred += chunk.len() as u64;
            on_progress(UploadProgress {
                key: key.to_string(),
                bytes_transferred,
                total_bytes,
            });
        }
        file.flush().await?;

        tracing::debug!(key, size_bytes = total_bytes, "stored object");
        Ok(StoredObject {
            key: key.to_string(),
            size_bytes: total_bytes,
        })
    }

    async fn cancel(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(key, "removed partial upload");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }

    async fn download_url(&self, key: &str) -> Result<String> {
        let path = self.path_for(key)?;
        if !tokio::fs::try_exists(&path).await? {
            return Err(Error::NotFound(format!("object {}", key)));
        }

        let encoded: Vec<String> = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        Ok(format!(
            "{}/media/{}",
            self.public_base_url.trim_end_matches('/'),
            encoded.join("/")
        ))
    }
}
