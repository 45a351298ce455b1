use serde::{Deserialize, Serialize};

/// Engagement kinds that produce notifications (and have a cooldown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Repost,
}

impl NotificationKind {
    /// Convert from string. Surrounding whitespace is ignored, case is not.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "like" => Some(NotificationKind::Like),
            "repost" => Some(NotificationKind::Repost),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Like => "like",
            NotificationKind::Repost => "repost",
        }
    }
}

impl From<NotificationKind> for String {
    fn from(kind: NotificationKind) -> Self {
        kind.as_str().to_string()
    }
}

impl TryFrom<&str> for NotificationKind {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value).ok_or_else(|| format!("Invalid notification kind: {}", value))
    }
}
