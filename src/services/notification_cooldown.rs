//! Cooldown admission gate for engagement notifications.
//!
//! Decides whether a like/repost notification may be sent to a recipient and,
//! when it may, records the new window start in the same statement. Malformed
//! input never blocks a notification: it is admitted without touching the store.

use chrono::{DateTime, Duration, Utc};
use sqlx::{Executor, Sqlite};

use crate::db::models::{CooldownCandidate, CooldownKey};
use crate::db::NotificationCooldownRepository;
use crate::error::AppResult;

pub const DEFAULT_COOLDOWN_MINUTES: f64 = 15.0;

/// Returns `true` when the notification should be created and sent.
///
/// `cooldown_minutes` defaults to [`DEFAULT_COOLDOWN_MINUTES`]. The only error
/// is a failure of the underlying store; suppression is `Ok(false)`.
#[cfg_attr(not(test), allow(dead_code))]
pub async fn bump_notification_cooldown_if_allowed<'e, E>(
    executor: E,
    candidate: &CooldownCandidate,
    cooldown_minutes: Option<f64>,
) -> AppResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    bump_notification_cooldown_if_allowed_at(executor, candidate, cooldown_minutes, Utc::now())
        .await
}

/// Same as [`bump_notification_cooldown_if_allowed`] with an explicit clock.
pub async fn bump_notification_cooldown_if_allowed_at<'e, E>(
    executor: E,
    candidate: &CooldownCandidate,
    cooldown_minutes: Option<f64>,
    now: DateTime<Utc>,
) -> AppResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let Some(key) = CooldownKey::from_candidate(candidate) else {
        tracing::debug!(?candidate, "Cooldown key incomplete, admitting notification");
        return Ok(true);
    };

    let minutes = cooldown_minutes.unwrap_or(DEFAULT_COOLDOWN_MINUTES);
    let Some(cooldown) = cooldown_window(minutes) else {
        tracing::debug!(minutes, "Invalid cooldown window, admitting notification");
        return Ok(true);
    };

    match NotificationCooldownRepository::bump_if_allowed(executor, &key, cooldown, now).await? {
        Some(record) => {
            tracing::debug!(
                recipient = %record.recipient_user_id,
                kind = %record.kind,
                actor = %record.actor_profile_id,
                post = %record.post_id,
                last_sent_at = ?record.last_sent_at_utc(),
                "Notification admitted by cooldown gate"
            );
            Ok(true)
        }
        None => {
            tracing::debug!(
                recipient = %key.recipient_user_id,
                kind = key.kind.as_str(),
                actor = %key.actor_profile_id,
                post = %key.post_id,
                "Notification suppressed by cooldown"
            );
            Ok(false)
        }
    }
}

/// `None` for non-finite or non-positive minute counts.
fn cooldown_window(minutes: f64) -> Option<Duration> {
    if !minutes.is_finite() || minutes <= 0.0 {
        return None;
    }

    let millis = (minutes * 60_000.0).round().min(i64::MAX as f64) as i64;
    Some(Duration::try_milliseconds(millis).unwrap_or(Duration::MAX))
}
