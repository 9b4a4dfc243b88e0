//! The singleton banner configuration (`ads/config`).

use crate::Result;
use crate::types::BannerConfig;

use super::posts::query_failed;
use super::{BannerRow, Database};

impl Database {
    /// Read the banner configuration, if one has ever been saved
    pub async fn load_banner(&self) -> Result<Option<BannerConfig>> {
        let row = sqlx::query_as::<_, BannerRow>(
            r#"
            SELECT enabled, image_url, text, link, expiry_days, updated_at
            FROM ads
            WHERE id = 'config'
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_failed("Failed to load banner configuration", e))?;

        Ok(row.map(BannerConfig::from))
    }

    /// Overwrite the banner configuration. Last writer wins.
    pub async fn store_banner(&self, config: &BannerConfig) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO ads (id, enabled, image_url, text, link, expiry_days, updated_at)
            VALUES ('config', ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                enabled = excluded.enabled,
                image_url = excluded.image_url,
                text = excluded.text,
                link = excluded.link,
                expiry_days = excluded.expiry_days,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(i32::from(config.enabled))
        .bind(&config.active_ad.image_url)
        .bind(&config.active_ad.text)
        .bind(&config.active_ad.link)
        .bind(i64::from(config.active_ad.expiry_days))
        .bind(config.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| query_failed("Failed to save banner configuration", e))?;

        Ok(())
    }
}
