pub mod init;
pub mod notification_cooldown;
pub mod notifications;
