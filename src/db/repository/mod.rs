pub mod notification_cooldown_repository;
pub mod notification_repository;

pub use notification_cooldown_repository::NotificationCooldownRepository;
pub use notification_repository::NotificationRepository;
