//! Admin console operations: publishing, post history and the banner.

use futures::FutureExt;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::backend::PostQuery;
use crate::error::{Error, Result};
use crate::locale::Language;
use crate::storage::object_key;
use crate::subscription::SubscriptionHandle;
use crate::types::{Actor, ArticleId, BannerConfig, Category, Event, NewPost, StoreChange, UploadProgress};
use crate::views::{BannerView, PostSummary};

use super::Newsroom;

/// Shown when a required text field is empty
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

/// Article form as submitted from the admin console
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct PostForm {
    /// Tamil title
    pub title: String,
    /// English title
    pub english_title: String,
    /// Tamil body
    pub content: String,
    /// English body
    pub english_content: String,
    /// Category slug
    pub category: String,
    /// Video URL
    #[serde(default)]
    pub video_link: Option<String>,
}

impl PostForm {
    /// Check the form and turn it into a post without an image
    fn into_new_post(self) -> Result<NewPost> {
        let required = [
            &self.title,
            &self.english_title,
            &self.content,
            &self.english_content,
            &self.category,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(Error::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        }

        let category: Category = self.category.trim().parse()?;
        Ok(NewPost {
            title: self.title,
            english_title: Some(self.english_title),
            content: self.content,
            english_content: Some(self.english_content),
            category,
            image_url: None,
            video_link: self.video_link.filter(|link| !link.trim().is_empty()),
        })
    }
}

/// Image attached to a new article
#[derive(Clone, Debug)]
pub struct ImageUpload {
    /// Original file name
    pub file_name: String,
    /// MIME type reported by the client
    pub content_type: Option<String>,
    /// File contents
    pub bytes: Vec<u8>,
}

impl Newsroom {
    /// Publish an article, uploading its image first.
    ///
    /// The upload runs under the configured deadline. When it expires the
    /// partial object is removed and [`Error::UploadTimeout`] is returned;
    /// no post is written in that case. If writing the post fails, the
    /// uploaded image is removed again.
    pub async fn publish_post(
        &self,
        actor: &Actor,
        form: PostForm,
        image: Option<ImageUpload>,
    ) -> Result<ArticleId> {
        let mut post = form.into_new_post()?;

        let uploaded_key = match image {
            Some(image) => {
                let (key, url) = self.upload_image(actor, image).await?;
                post.image_url = Some(url);
                Some(key)
            }
            None => None,
        };

        let category = post.category;
        let id = match self.store.add_post(actor, post).await {
            Ok(id) => id,
            Err(e) => {
                if let Some(key) = uploaded_key {
                    tracing::warn!(key = %key, error = %e, "post not saved, removing uploaded image");
                    if let Err(cleanup) = self.storage.cancel(&key).await {
                        tracing::warn!(key = %key, error = %cleanup, "failed to remove orphaned image");
                    }
                }
                return Err(e);
            }
        };

        tracing::info!(%id, %category, email = %actor.email, "article published");
        self.emit(Event::PostPublished {
            id: id.clone(),
            category,
        });
        Ok(id)
    }

    /// Upload `image`, returning its object key and public URL
    async fn upload_image(&self, actor: &Actor, image: ImageUpload) -> Result<(String, String)> {
        if let Some(content_type) = image.content_type.as_deref()
            && !content_type.starts_with("image/")
        {
            return Err(Error::Validation(format!(
                "Only image files can be attached (got {}).",
                content_type
            )));
        }
        let max_bytes = self.config.upload.max_image_bytes;
        if image.bytes.len() > max_bytes {
            return Err(Error::Validation(format!(
                "Image is too large ({} bytes, limit {}).",
                image.bytes.len(),
                max_bytes
            )));
        }

        let key = object_key(&image.file_name, chrono::Utc::now().timestamp_millis());
        let deadline = self.config.upload.timeout;
        let progress_tx = self.event_tx.clone();
        let on_progress = move |progress: UploadProgress| {
            let _ = progress_tx.send(Event::UploadProgress {
                key: progress.key,
                bytes_transferred: progress.bytes_transferred,
                total_bytes: progress.total_bytes,
            });
        };

        tracing::debug!(key = %key, size_bytes = image.bytes.len(), "uploading image");
        let upload = self
            .storage
            .upload(actor, &key, &image.bytes, &on_progress);

        match tokio::time::timeout(deadline, upload).await {
            Ok(Ok(_stored)) => {}
            Ok(Err(e)) => {
                tracing::error!(key = %key, error = %e, "image upload failed");
                self.emit(Event::UploadFailed {
                    key: key.clone(),
                    reason: e.public_message(),
                });
                if let Err(cleanup) = self.storage.cancel(&key).await {
                    tracing::warn!(key = %key, error = %cleanup, "failed to remove partial upload");
                }
                return Err(e);
            }
            Err(_) => {
                let e = Error::UploadTimeout {
                    secs: deadline.as_secs(),
                };
                tracing::error!(key = %key, timeout_secs = deadline.as_secs(), "image upload timed out");
                if let Err(cleanup) = self.storage.cancel(&key).await {
                    tracing::warn!(key = %key, error = %cleanup, "failed to cancel timed out upload");
                }
                self.emit(Event::UploadFailed {
                    key: key.clone(),
                    reason: e.public_message(),
                });
                return Err(e);
            }
        }

        match self.storage.download_url(&key).await {
            Ok(url) => Ok((key, url)),
            Err(e) => {
                if let Err(cleanup) = self.storage.cancel(&key).await {
                    tracing::warn!(key = %key, error = %cleanup, "failed to remove unreachable upload");
                }
                Err(e)
            }
        }
    }

    /// Delete an article
    pub async fn delete_post(&self, actor: &Actor, id: &ArticleId) -> Result<()> {
        if !self.store.delete_post(actor, id).await? {
            return Err(Error::NotFound(format!("article {}", id)));
        }

        tracing::info!(%id, email = %actor.email, "article deleted");
        self.emit(Event::PostDeleted { id: id.clone() });
        Ok(())
    }

    /// Every article, newest first
    pub async fn list_posts(&self, lang: Language) -> Result<Vec<PostSummary>> {
        let articles = self.store.query_posts(PostQuery::all_newest_first()).await?;
        let now = chrono::Utc::now().timestamp();
        Ok(articles
            .iter()
            .map(|article| PostSummary::new(article, lang, now))
            .collect())
    }

    /// Live post history. `callback` receives the full list now and after
    /// every change until the handle is dropped.
    pub fn watch_posts<F>(&self, lang: Language, callback: F) -> SubscriptionHandle
    where
        F: Fn(Vec<PostSummary>) + Send + Sync + 'static,
    {
        let this = self.clone();
        SubscriptionHandle::watch(
            self.store.changes(),
            StoreChange::Posts,
            move || {
                let this = this.clone();
                async move { this.list_posts(lang).await }.boxed()
            },
            callback,
        )
    }

    /// Current banner configuration; defaults when none was ever saved
    pub async fn banner_config(&self) -> Result<BannerView> {
        let config = self.store.banner_config().await?.unwrap_or_default();
        Ok(BannerView::new(config, chrono::Utc::now().timestamp()))
    }

    /// Overwrite the banner configuration, stamping it with the save time
    pub async fn save_banner(&self, actor: &Actor, mut config: BannerConfig) -> Result<BannerView> {
        if config.active_ad.expiry_days < 1 {
            return Err(Error::Validation(
                "Banner must run for at least one day.".to_string(),
            ));
        }

        let now = chrono::Utc::now().timestamp();
        config.updated_at = Some(now);
        let enabled = config.enabled;
        self.store.set_banner_config(actor, config.clone()).await?;

        tracing::info!(enabled, email = %actor.email, "banner configuration saved");
        self.emit(Event::BannerSaved { enabled });
        Ok(BannerView::new(config, now))
    }

    /// Live banner configuration
    pub fn watch_banner<F>(&self, callback: F) -> SubscriptionHandle
    where
        F: Fn(BannerView) + Send + Sync + 'static,
    {
        let this = self.clone();
        SubscriptionHandle::watch(
            self.store.changes(),
            StoreChange::Ads,
            move || {
                let this = this.clone();
                async move { this.banner_config().await }.boxed()
            },
            callback,
        )
    }
}
