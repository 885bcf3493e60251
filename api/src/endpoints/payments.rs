use super::segment;
use crate::{
    ApiClient, ApiError,
    transport::ApiRequest,
    types::{InitiatePaymentRequest, Payment, PaymentId, PaymentInitiation},
};

impl ApiClient {
    /// `POST /payments/initiate`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn initiate_payment(
        &self,
        request: &InitiatePaymentRequest,
    ) -> Result<PaymentInitiation, ApiError> {
        self.call(ApiRequest::post("/payments/initiate").json(request)?)
            .await
    }

    /// `GET /payments/my-payments`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn my_payments(&self) -> Result<Vec<Payment>, ApiError> {
        self.call(ApiRequest::get("/payments/my-payments")).await
    }

    /// `GET /payments/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn get_payment(&self, id: &PaymentId) -> Result<Payment, ApiError> {
        let id = segment(id.as_str());
        self.call(ApiRequest::get(format!("/payments/{id}"))).await
    }
}
