use super::segment;
use crate::{
    ApiClient, ApiError,
    envelope::Acknowledgement,
    transport::ApiRequest,
    types::{Notification, NotificationId, UnreadCount},
};

impl ApiClient {
    /// `GET /notifications`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.call(ApiRequest::get("/notifications")).await
    }

    /// `GET /notifications/unread-count`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn unread_count(&self) -> Result<UnreadCount, ApiError> {
        self.call(ApiRequest::get("/notifications/unread-count"))
            .await
    }

    /// `PUT /notifications/{id}/read`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::acknowledge`].
    pub async fn mark_notification_read(
        &self,
        id: &NotificationId,
    ) -> Result<Acknowledgement, ApiError> {
        let id = segment(id.as_str());
        self.acknowledge(ApiRequest::put(format!("/notifications/{id}/read")))
            .await
    }

    /// `PUT /notifications/read-all`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::acknowledge`].
    pub async fn mark_all_notifications_read(&self) -> Result<Acknowledgement, ApiError> {
        self.acknowledge(ApiRequest::put("/notifications/read-all"))
            .await
    }
}
