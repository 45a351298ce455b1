use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::NotificationKind;

/// A stored engagement notification.
///
/// `created_at` is kept as canonical ISO-8601 text so it can be compared
/// directly against a decoded cursor timestamp.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub recipient_user_id: String,
    pub kind: String,
    pub actor_profile_id: String,
    pub post_id: String,
    pub created_at: String,
    pub read_at: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub recipient_user_id: String,
    pub kind: NotificationKind,
    pub actor_profile_id: String,
    pub post_id: String,
}
