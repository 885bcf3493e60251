use super::NotificationId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// In-app notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Identifier
    pub id: NotificationId,
    /// Headline
    pub title: String,
    /// Text
    #[serde(default, alias = "message")]
    pub body: String,
    /// Server-defined category, e.g. `TICKET_PURCHASED`
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Whether the user has seen it
    #[serde(default, alias = "isRead")]
    pub read: bool,
    /// Creation time
    pub created_at: Option<DateTime<Utc>>,
}

/// Number of unread notifications
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadCount {
    /// Count
    pub count: u64,
}
