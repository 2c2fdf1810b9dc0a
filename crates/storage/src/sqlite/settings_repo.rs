use async_trait::async_trait;
use prep_core::model::{SettingKey, SettingValue};
use sqlx::Row;

use super::{
    SqliteRepository,
    mapping::{conn, decode_setting, encode_setting, ser},
};
use crate::repository::{SettingsRepository, StorageError};

#[async_trait]
impl SettingsRepository for SqliteRepository {
    async fn put_setting(
        &self,
        key: &SettingKey,
        value: &SettingValue,
    ) -> Result<(), StorageError> {
        let (kind, raw) = encode_setting(value);
        sqlx::query(
            r"
            INSERT INTO settings (key, kind, value)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                kind = excluded.kind,
                value = excluded.value
            ",
        )
        .bind(key.as_str())
        .bind(kind)
        .bind(raw)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        tracing::debug!(%key, kind, "stored setting");
        Ok(())
    }

    async fn get_setting(&self, key: &SettingKey) -> Result<Option<SettingValue>, StorageError> {
        let row = sqlx::query("SELECT kind, value FROM settings WHERE key = ?1")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let kind: String = row.try_get("kind").map_err(ser)?;
        let value: String = row.try_get("value").map_err(ser)?;
        decode_setting(&kind, value).map(Some)
    }
}
