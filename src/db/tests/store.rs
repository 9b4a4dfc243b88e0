use crate::Error;
use crate::backend::{DocumentStore, PostQuery};
use crate::db::*;
use crate::error::Resource;
use crate::types::{ArticleId, BannerConfig, Category, StoreChange};
use tempfile::NamedTempFile;

use super::{editor, new_post, viewer};

#[tokio::test]
async fn test_writes_notify_subscribers() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();
    let mut changes = db.changes();

    let id = db
        .add_post(&editor(), new_post("live", Category::Technology))
        .await
        .unwrap();
    assert_eq!(changes.recv().await.unwrap(), StoreChange::Posts);

    db.set_banner_config(&editor(), BannerConfig::default())
        .await
        .unwrap();
    assert_eq!(changes.recv().await.unwrap(), StoreChange::Ads);

    assert!(db.delete_post(&editor(), &id).await.unwrap());
    assert_eq!(changes.recv().await.unwrap(), StoreChange::Posts);
}

#[tokio::test]
async fn test_deleting_missing_post_does_not_notify() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();
    let mut changes = db.changes();

    let removed = db
        .delete_post(&editor(), &ArticleId::new("missing"))
        .await
        .unwrap();

    assert!(!removed);
    assert!(changes.try_recv().is_err());
}

#[tokio::test]
async fn test_writes_without_publish_rights_are_denied() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    let add = db.add_post(&viewer(), new_post("x", Category::Sport)).await;
    assert!(matches!(
        add,
        Err(Error::PermissionDenied {
            resource: Resource::Posts
        })
    ));

    let ads = db
        .set_banner_config(&viewer(), BannerConfig::default())
        .await;
    assert!(matches!(
        ads,
        Err(Error::PermissionDenied {
            resource: Resource::Ads
        })
    ));

    let posts = db.query_posts(PostQuery::all_newest_first()).await.unwrap();
    assert!(posts.is_empty(), "rejected write left no data behind");
}
