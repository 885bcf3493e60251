use crate::{
    ApiClient, ApiError,
    transport::ApiRequest,
    types::{Category, Location},
};

impl ApiClient {
    /// `GET /categories`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.call(ApiRequest::get("/categories")).await
    }

    /// `GET /locations`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn locations(&self) -> Result<Vec<Location>, ApiError> {
        self.call(ApiRequest::get("/locations")).await
    }
}
