use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::NotificationKind;

// ============================================================================
// Notification Cooldown Models
// ============================================================================

/// A row of `notification_cooldowns`, keyed by
/// `(recipient_user_id, kind, actor_profile_id, post_id)`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CooldownRecord {
    pub recipient_user_id: String,
    pub kind: String,
    pub actor_profile_id: String,
    pub post_id: String,
    /// Epoch milliseconds (UTC) of the last admitted notification.
    pub last_sent_at: i64,
}

impl CooldownRecord {
    pub fn last_sent_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.last_sent_at)
    }
}

/// A candidate event exactly as a caller supplied it. Nothing is validated yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CooldownCandidate {
    #[serde(default)]
    pub recipient_user_id: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub actor_profile_id: String,
    #[serde(default)]
    pub post_id: String,
}

/// Trimmed, non-blank natural key for a cooldown row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CooldownKey {
    pub recipient_user_id: String,
    pub kind: NotificationKind,
    pub actor_profile_id: String,
    pub post_id: String,
}

impl CooldownKey {
    /// Returns `None` when any identity field is blank or the kind is unknown.
    pub fn from_candidate(candidate: &CooldownCandidate) -> Option<Self> {
        let recipient_user_id = non_blank(&candidate.recipient_user_id)?;
        let kind = NotificationKind::from_str(&candidate.kind)?;
        let actor_profile_id = non_blank(&candidate.actor_profile_id)?;
        let post_id = non_blank(&candidate.post_id)?;

        Some(CooldownKey {
            recipient_user_id,
            kind,
            actor_profile_id,
            post_id,
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
