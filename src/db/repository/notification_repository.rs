use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::db::models::{CreateNotification, Notification};
use crate::error::{AppError, AppResult};
use crate::pagination::{to_iso_millis, CompositeCursor};

// ============================================================================
// Notification Repository
// ============================================================================

pub struct NotificationRepository;

impl NotificationRepository {
    pub async fn create<'e, E>(
        executor: E,
        notification: CreateNotification,
        now: DateTime<Utc>,
    ) -> AppResult<Notification>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let id = Uuid::new_v4().to_string();

        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (
                id, recipient_user_id, kind, actor_profile_id, post_id, created_at, read_at
            )
            VALUES (?, ?, ?, ?, ?, ?, NULL)
            RETURNING
                id,
                recipient_user_id,
                kind,
                actor_profile_id,
                post_id,
                created_at,
                read_at
            "#,
        )
        .bind(id)
        .bind(notification.recipient_user_id)
        .bind(notification.kind.as_str())
        .bind(notification.actor_profile_id)
        .bind(notification.post_id)
        .bind(to_iso_millis(&now))
        .fetch_one(executor)
        .await
        .map_err(AppError::Database)
    }

    /// Newest-first notifications for a recipient, strictly after `cursor` in
    /// `(created_at DESC, id DESC)` order. Returns at most `limit` rows.
    pub async fn list_by_recipient(
        pool: &SqlitePool,
        recipient_user_id: &str,
        cursor: Option<&CompositeCursor>,
        limit: i64,
    ) -> AppResult<Vec<Notification>> {
        let (cursor_t, cursor_id) = match cursor {
            Some(c) => (Some(c.t.as_str()), Some(c.id.as_str())),
            None => (None, None),
        };

        sqlx::query_as::<_, Notification>(
            r#"
            SELECT
                id,
                recipient_user_id,
                kind,
                actor_profile_id,
                post_id,
                created_at,
                read_at
            FROM notifications
            WHERE recipient_user_id = ?
            AND (
                ? IS NULL
                OR created_at < ?
                OR (created_at = ? AND id < ?)
            )
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(recipient_user_id)
        .bind(cursor_t)
        .bind(cursor_t)
        .bind(cursor_t)
        .bind(cursor_id)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(AppError::Database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::NotificationKind;
    use crate::services::init::test_pool;
    use chrono::{Duration, TimeZone};

    fn create(recipient: &str, post: &str) -> CreateNotification {
        CreateNotification {
            recipient_user_id: recipient.to_string(),
            kind: NotificationKind::Repost,
            actor_profile_id: "p1".to_string(),
            post_id: post.to_string(),
        }
    }

    #[tokio::test]
    async fn create_stores_canonical_timestamp() {
        let pool = test_pool().await;
        let now = Utc.with_ymd_and_hms(2024, 1, 9, 10, 0, 0).unwrap();

        let created = NotificationRepository::create(&pool, create("u1", "post_1"), now)
            .await
            .unwrap();

        assert_eq!(created.created_at, "2024-01-09T10:00:00.000Z");
        assert_eq!(created.kind, "repost");
        assert!(created.read_at.is_none());
        assert!(Uuid::parse_str(&created.id).is_ok());
    }

    #[tokio::test]
    async fn list_filters_by_recipient_and_orders_newest_first() {
        let pool = test_pool().await;
        let t0 = Utc.with_ymd_and_hms(2024, 1, 9, 10, 0, 0).unwrap();

        for (i, recipient) in ["u1", "u2", "u1"].iter().enumerate() {
            NotificationRepository::create(
                &pool,
                create(recipient, &format!("post_{}", i)),
                t0 + Duration::seconds(i as i64),
            )
            .await
            .unwrap();
        }

        let rows = NotificationRepository::list_by_recipient(&pool, "u1", None, 10)
            .await
            .unwrap();
        let posts: Vec<_> = rows.iter().map(|n| n.post_id.as_str()).collect();
        assert_eq!(posts, vec!["post_2", "post_0"]);
    }

    #[tokio::test]
    async fn cursor_breaks_ties_on_id() {
        let pool = test_pool().await;
        let t0 = Utc.with_ymd_and_hms(2024, 1, 9, 10, 0, 0).unwrap();

        for i in 0..3 {
            NotificationRepository::create(&pool, create("u1", &format!("post_{}", i)), t0)
                .await
                .unwrap();
        }

        let all = NotificationRepository::list_by_recipient(&pool, "u1", None, 10)
            .await
            .unwrap();
        assert_eq!(all.len(), 3);

        let cursor = CompositeCursor {
            t: all[0].created_at.clone(),
            id: all[0].id.clone(),
        };
        let rest = NotificationRepository::list_by_recipient(&pool, "u1", Some(&cursor), 10)
            .await
            .unwrap();
        let rest_ids: Vec<_> = rest.iter().map(|n| n.id.clone()).collect();
        let expected: Vec<_> = all[1..].iter().map(|n| n.id.clone()).collect();
        assert_eq!(rest_ids, expected);
    }
}
