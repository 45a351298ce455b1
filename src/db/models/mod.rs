//! Database models, one file per table plus shared enums.

pub mod notification;
pub mod notification_cooldown;
pub mod notification_kind;

pub use self::notification::*;
pub use self::notification_cooldown::*;
pub use self::notification_kind::*;
