use crate::{
    ApiClient, ApiError,
    transport::ApiRequest,
    types::{AuthSession, LoginRequest, ProfileUpdate, RegisterRequest, User},
};

impl ApiClient {
    /// `POST /auth/login`
    ///
    /// Does not touch the session; the caller decides what to persist.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthSession, ApiError> {
        self.call(ApiRequest::post("/auth/login").json(request)?).await
    }

    /// `POST /auth/register`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthSession, ApiError> {
        self.call(ApiRequest::post("/auth/register").json(request)?)
            .await
    }

    /// `GET /users/me`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.call(ApiRequest::get("/users/me")).await
    }

    /// `PUT /users/me`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        self.call(ApiRequest::put("/users/me").json(update)?).await
    }
}
