use crate::db::*;
use crate::types::{Banner, BannerConfig};
use tempfile::NamedTempFile;

fn banner(text: &str, enabled: bool) -> BannerConfig {
    BannerConfig {
        enabled,
        active_ad: Banner {
            image_url: "https://cdn.example.com/ad.jpg".to_string(),
            text: text.to_string(),
            link: "https://shop.example.com".to_string(),
            expiry_days: 7,
        },
        updated_at: Some(1_700_000_000),
    }
}

#[tokio::test]
async fn test_banner_absent_until_saved() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    assert!(db.load_banner().await.unwrap().is_none());
}

#[tokio::test]
async fn test_banner_last_writer_wins() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    db.store_banner(&banner("first", true)).await.unwrap();
    db.store_banner(&banner("second", false)).await.unwrap();

    let loaded = db.load_banner().await.unwrap().unwrap();
    assert_eq!(loaded, banner("second", false));

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ads")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(rows, 1, "configuration is a singleton");
}
