use {anyhow::Result, async_trait::async_trait, sqlx::SqlitePool};

use offduty_gate::store::{DutyState, DutyStore};

/// SQLite-backed duty store.
///
/// One row per channel, keyed by `(platform, channel_id)`; toggles upsert in
/// place, rows are never deleted.
pub struct SqliteDutyStore {
    pool: SqlitePool,
}

impl SqliteDutyStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the duty_state table schema.
    pub async fn init(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS duty_state (
                platform   TEXT    NOT NULL,
                channel_id TEXT    NOT NULL,
                off_duty   INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (platform, channel_id)
            )"#,
        )
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl DutyStore for SqliteDutyStore {
    async fn set_off_duty(&self, platform: &str, channel_id: &str, off_duty: bool) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO duty_state (platform, channel_id, off_duty)
               VALUES (?, ?, ?)
               ON CONFLICT(platform, channel_id) DO UPDATE SET
                 off_duty = excluded.off_duty"#,
        )
        .bind(platform)
        .bind(channel_id)
        .bind(off_duty)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, platform: &str, channel_id: &str) -> Result<DutyState> {
        let flag: Option<bool> = sqlx::query_scalar(
            "SELECT off_duty FROM duty_state WHERE platform = ? AND channel_id = ?",
        )
        .bind(platform)
        .bind(channel_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(flag.map_or(DutyState::Unset, DutyState::from_flag))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        SqliteDutyStore::init(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn missing_record_reads_as_unset() {
        let store = SqliteDutyStore::new(test_pool().await);

        let state = store.get("test", "42").await.unwrap();
        assert_eq!(state, DutyState::Unset);
        assert!(!state.is_off_duty());
    }

    #[tokio::test]
    async fn set_and_get_round_trip() {
        let store = SqliteDutyStore::new(test_pool().await);

        store.set_off_duty("test", "42", true).await.unwrap();
        assert_eq!(store.get("test", "42").await.unwrap(), DutyState::OffDuty);

        store.set_off_duty("test", "42", false).await.unwrap();
        // The record still exists; it reads as Active, not Unset.
        assert_eq!(store.get("test", "42").await.unwrap(), DutyState::Active);
    }

    #[tokio::test]
    async fn upsert_keeps_a_single_row_per_channel() {
        let pool = test_pool().await;
        let store = SqliteDutyStore::new(pool.clone());

        store.set_off_duty("test", "42", true).await.unwrap();
        store.set_off_duty("test", "42", false).await.unwrap();
        store.set_off_duty("test", "42", true).await.unwrap();

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM duty_state")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
        assert!(store.get("test", "42").await.unwrap().is_off_duty());
    }

    #[tokio::test]
    async fn composite_key_isolates_platforms() {
        let store = SqliteDutyStore::new(test_pool().await);

        store.set_off_duty("qq", "42", true).await.unwrap();

        assert_eq!(store.get("telegram", "42").await.unwrap(), DutyState::Unset);
        assert_eq!(store.get("qq", "42").await.unwrap(), DutyState::OffDuty);
    }

    #[tokio::test]
    async fn toggling_one_channel_leaves_others_untouched() {
        let store = SqliteDutyStore::new(test_pool().await);

        store.set_off_duty("test", "a", true).await.unwrap();
        store.set_off_duty("test", "b", false).await.unwrap();

        assert_eq!(store.get("test", "a").await.unwrap(), DutyState::OffDuty);
        assert_eq!(store.get("test", "b").await.unwrap(), DutyState::Active);
        assert_eq!(store.get("test", "c").await.unwrap(), DutyState::Unset);
    }
}
