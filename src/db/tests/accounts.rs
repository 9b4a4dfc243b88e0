use crate::db::*;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_account_upsert_replaces_credentials() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    db.upsert_account("editor@example.com", "hash1", "salt1", true)
        .await
        .unwrap();
    db.upsert_account("editor@example.com", "hash2", "salt2", false)
        .await
        .unwrap();

    let account = db.find_account("editor@example.com").await.unwrap().unwrap();
    assert_eq!(account.password_hash, "hash2");
    assert_eq!(account.salt, "salt2");
    assert!(!account.actor().can_publish);

    assert!(db.find_account("other@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_sessions_join_account_permissions() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    db.upsert_account("editor@example.com", "h", "s", true)
        .await
        .unwrap();
    db.insert_session("tok", "editor@example.com", 10, 20)
        .await
        .unwrap();

    let session = db.find_session("tok").await.unwrap().unwrap();
    assert_eq!(session.email, "editor@example.com");
    assert_eq!(session.can_publish, 1);
    assert_eq!(session.expires_at, 20);

    assert!(db.delete_session("tok").await.unwrap());
    assert!(!db.delete_session("tok").await.unwrap());
    assert!(db.find_session("tok").await.unwrap().is_none());
}

#[tokio::test]
async fn test_session_for_unknown_account_is_rejected() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    let result = db.insert_session("tok", "ghost@example.com", 0, 1).await;
    assert!(result.is_err(), "foreign key should reject orphan sessions");
}

#[tokio::test]
async fn test_expired_sessions_are_purged() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    db.upsert_account("editor@example.com", "h", "s", true)
        .await
        .unwrap();
    db.insert_session("old", "editor@example.com", 0, 100)
        .await
        .unwrap();
    db.insert_session("fresh", "editor@example.com", 0, 1_000)
        .await
        .unwrap();

    assert_eq!(db.delete_expired_sessions(100).await.unwrap(), 1);
    assert!(db.find_session("old").await.unwrap().is_none());
    assert!(db.find_session("fresh").await.unwrap().is_some());
}
