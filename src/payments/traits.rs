//! Adyen transport trait
//!
//! Defines the calls the gateway makes against the Checkout API so the
//! gateway can run against the HTTP client or an in-memory fake.

use crate::error::GatewayResult;
use crate::payments::types::{
    ApiPaymentRequest, PaymentMethodInfo, PaymentResponse, PaymentResultRequest,
    PaymentResultResponse, PaymentSessionResponse, SessionRequest,
};
use async_trait::async_trait;

/// Calls against the Adyen Checkout API
///
/// Implementations must be safe to share between concurrent payments and
/// must not retry on their own; retry policy belongs to the host.
#[async_trait]
pub trait AdyenApi: Send + Sync {
    /// Create a payment through the redirect integration
    ///
    /// # Arguments
    /// * `request` - Payment request including the selected payment method
    ///
    /// # Returns
    /// * `PaymentResponse` - PSP reference and, for redirect methods, the URL
    ///   to send the shopper to
    async fn create_payment(&self, request: &ApiPaymentRequest) -> GatewayResult<PaymentResponse>;

    /// Create a payment session for the browser checkout SDK
    ///
    /// # Returns
    /// * `PaymentSessionResponse` - Opaque session token for the SDK
    async fn create_payment_session(
        &self,
        request: &SessionRequest,
    ) -> GatewayResult<PaymentSessionResponse>;

    /// Decode the `payload` handed back on the shopper's return
    async fn get_payment_result(
        &self,
        request: &PaymentResultRequest,
    ) -> GatewayResult<PaymentResultResponse>;

    /// List the payment methods enabled for the merchant account
    async fn get_payment_methods(&self) -> GatewayResult<Vec<PaymentMethodInfo>>;
}
