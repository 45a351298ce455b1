use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::config::{NotificationConfig, PaginationConfig};
use crate::db::{
    CooldownCandidate, CooldownKey, CreateNotification, Notification, NotificationRepository,
};
use crate::error::{AppError, AppResult};
use crate::pagination::{make_composite_cursor, parse_composite_cursor, Page};
use crate::services::notification_cooldown::bump_notification_cooldown_if_allowed_at;
use crate::AppState;

/// A like or repost that may notify the post's author.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementEvent {
    #[serde(flatten)]
    pub candidate: CooldownCandidate,
    /// Per-call override; the configured window applies when absent.
    pub cooldown_minutes: Option<f64>,
}

pub struct NotificationService {
    pool: SqlitePool,
    notifications: NotificationConfig,
    pagination: PaginationConfig,
}

impl NotificationService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            pool: state.db.clone(),
            notifications: state.config.notifications.clone(),
            pagination: state.config.pagination.clone(),
        }
    }

    /// Run the cooldown gate and, if admitted, store the notification in the
    /// same transaction. Returns `None` when the cooldown suppressed it.
    pub async fn record_engagement(&self, event: EngagementEvent) -> AppResult<Option<Notification>> {
        self.record_engagement_at(event, Utc::now()).await
    }

    pub async fn record_engagement_at(
        &self,
        event: EngagementEvent,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        let cooldown_minutes = event
            .cooldown_minutes
            .or(Some(self.notifications.cooldown_minutes));

        let mut tx = self.pool.begin().await?;

        let allowed = bump_notification_cooldown_if_allowed_at(
            &mut *tx,
            &event.candidate,
            cooldown_minutes,
            now,
        )
        .await?;
        if !allowed {
            tx.rollback().await?;
            return Ok(None);
        }

        // The gate admits malformed events; a stored notification still needs a full key.
        let key = CooldownKey::from_candidate(&event.candidate).ok_or_else(|| {
            AppError::Validation(
                "recipientUserId, actorProfileId, postId and a kind of 'like' or 'repost' are required"
                    .to_string(),
            )
        })?;

        let notification = NotificationRepository::create(
            &mut *tx,
            CreateNotification {
                recipient_user_id: key.recipient_user_id,
                kind: key.kind,
                actor_profile_id: key.actor_profile_id,
                post_id: key.post_id,
            },
            now,
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Created {} notification {} for user {}",
            notification.kind,
            notification.id,
            notification.recipient_user_id
        );

        Ok(Some(notification))
    }

    /// One newest-first page of a recipient's notifications.
    ///
    /// An undecodable cursor starts from the beginning.
    pub async fn list_for_recipient(
        &self,
        recipient_user_id: &str,
        cursor: Option<&str>,
        limit: Option<i64>,
    ) -> AppResult<Page<Notification>> {
        let limit = self.clamp_limit(limit);
        let cursor = parse_composite_cursor(cursor);

        let mut items = NotificationRepository::list_by_recipient(
            &self.pool,
            recipient_user_id,
            cursor.as_ref(),
            limit + 1,
        )
        .await?;

        let has_more = items.len() as i64 > limit;
        items.truncate(limit as usize);

        let next_cursor = if has_more {
            items
                .last()
                .map(|last| make_composite_cursor(&last.created_at, &last.id))
        } else {
            None
        };

        Ok(Page { items, next_cursor })
    }

    fn clamp_limit(&self, limit: Option<i64>) -> i64 {
        let max = self.pagination.max_limit.max(1);
        limit
            .unwrap_or(self.pagination.default_limit)
            .clamp(1, max)
    }
}
