use chrono::{DateTime, Duration, Utc};
use sqlx::{Executor, Sqlite};

use crate::db::models::{CooldownKey, CooldownRecord};
use crate::error::{AppError, AppResult};

/// Repository for `notification_cooldowns`.
///
/// The table is only ever touched by [`NotificationCooldownRepository::bump_if_allowed`],
/// which reads and writes in one statement. There is no separate read path.
pub struct NotificationCooldownRepository;

impl NotificationCooldownRepository {
    /// Insert the key, or advance `last_sent_at` to `now` if the stored value is
    /// strictly older than `now - cooldown`.
    ///
    /// Returns the written row when the write took effect and `None` when the
    /// key is still cooling down. SQLite serializes concurrent writers on the
    /// primary key, so at most one of several simultaneous callers sees a row.
    pub async fn bump_if_allowed<'e, E>(
        executor: E,
        key: &CooldownKey,
        cooldown: Duration,
        now: DateTime<Utc>,
    ) -> AppResult<Option<CooldownRecord>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let now_ms = now.timestamp_millis();
        let threshold_ms = now_ms.saturating_sub(cooldown.num_milliseconds());

        sqlx::query_as::<_, CooldownRecord>(
            r#"
            INSERT INTO notification_cooldowns (
                recipient_user_id,
                kind,
                actor_profile_id,
                post_id,
                last_sent_at
            )
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(recipient_user_id, kind, actor_profile_id, post_id) DO UPDATE SET
                last_sent_at = excluded.last_sent_at
            WHERE notification_cooldowns.last_sent_at < ?
            RETURNING
                recipient_user_id,
                kind,
                actor_profile_id,
                post_id,
                last_sent_at
            "#,
        )
        .bind(&key.recipient_user_id)
        .bind(key.kind.as_str())
        .bind(&key.actor_profile_id)
        .bind(&key.post_id)
        .bind(now_ms)
        .bind(threshold_ms)
        .fetch_optional(executor)
        .await
        .map_err(AppError::Database)
    }
}
