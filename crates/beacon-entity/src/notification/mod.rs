//! Notification domain entities.

pub mod payload;
pub mod status;

pub use payload::{NotificationAction, NotificationData, NotificationPayload, PushFrame};
pub use status::{DeliveryStatus, StatusUpdate};
