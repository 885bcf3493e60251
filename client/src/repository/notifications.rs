use super::{ResourceStream, fetch};
use crate::messages;
use gatepass_api::types::{Notification, NotificationId, UnreadCount};
use gatepass_api::{Acknowledgement, ApiClient};

/// In-app notifications of the signed-in user
#[derive(Clone, Debug)]
pub struct NotificationRepository {
    api: ApiClient,
}

impl NotificationRepository {
    /// Create a repository over `api`
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Newest first, as the server orders them
    #[must_use]
    pub fn notifications(&self) -> ResourceStream<Vec<Notification>> {
        let api = self.api.clone();
        fetch("notifications", messages::NOTIFICATIONS_FAILED, async move {
            api.notifications().await
        })
    }

    /// Badge count
    #[must_use]
    pub fn unread_count(&self) -> ResourceStream<UnreadCount> {
        let api = self.api.clone();
        fetch("unread_count", messages::UNREAD_COUNT_FAILED, async move {
            api.unread_count().await
        })
    }

    /// Mark one notification read
    #[must_use]
    pub fn mark_read(&self, id: NotificationId) -> ResourceStream<Acknowledgement> {
        let api = self.api.clone();
        fetch("mark_notification_read", messages::MARK_READ_FAILED, async move {
            api.mark_notification_read(&id).await
        })
    }

    /// Mark everything read
    #[must_use]
    pub fn mark_all_read(&self) -> ResourceStream<Acknowledgement> {
        let api = self.api.clone();
        fetch("mark_all_notifications_read", messages::MARK_READ_FAILED, async move {
            api.mark_all_notifications_read().await
        })
    }
}
