//! Shared fixtures for gateway tests

#![allow(dead_code)]

use adyen_gateway::error::{GatewayError, GatewayResult};
use adyen_gateway::payments::host::{Money, Payment, StaticHost};
use adyen_gateway::payments::methods::MethodTag;
use adyen_gateway::payments::traits::AdyenApi;
use adyen_gateway::payments::types::{
    ApiPaymentRequest, PaymentMethodInfo, PaymentResponse, PaymentResultRequest,
    PaymentResultResponse, PaymentSessionResponse, SessionRequest,
};
use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory Adyen with canned answers and call counters.
#[derive(Default)]
pub struct FakeAdyen {
    pub payment: Mutex<Option<GatewayResult<PaymentResponse>>>,
    pub session: Mutex<Option<GatewayResult<PaymentSessionResponse>>>,
    pub result: Mutex<Option<GatewayResult<PaymentResultResponse>>>,
    pub methods: Mutex<Option<GatewayResult<Vec<PaymentMethodInfo>>>>,

    pub payment_requests: Mutex<Vec<ApiPaymentRequest>>,
    pub session_requests: Mutex<Vec<SessionRequest>>,
    pub result_calls: AtomicUsize,
}

fn take<T: Clone>(slot: &Mutex<Option<GatewayResult<T>>>, name: &str) -> GatewayResult<T> {
    slot.lock()
        .unwrap()
        .clone()
        .unwrap_or_else(|| Err(GatewayError::transport(format!("{} not stubbed", name))))
}

#[async_trait]
impl AdyenApi for FakeAdyen {
    async fn create_payment(&self, request: &ApiPaymentRequest) -> GatewayResult<PaymentResponse> {
        self.payment_requests.lock().unwrap().push(request.clone());
        take(&self.payment, "create_payment")
    }

    async fn create_payment_session(
        &self,
        request: &SessionRequest,
    ) -> GatewayResult<PaymentSessionResponse> {
        self.session_requests.lock().unwrap().push(request.clone());
        take(&self.session, "create_payment_session")
    }

    async fn get_payment_result(
        &self,
        _request: &PaymentResultRequest,
    ) -> GatewayResult<PaymentResultResponse> {
        self.result_calls.fetch_add(1, Ordering::SeqCst);
        take(&self.result, "get_payment_result")
    }

    async fn get_payment_methods(&self) -> GatewayResult<Vec<PaymentMethodInfo>> {
        take(&self.methods, "get_payment_methods")
    }
}

pub fn host() -> StaticHost {
    StaticHost {
        locale: "nl_NL".to_string(),
        home_url: "https://shop.example".to_string(),
        payments_result_url: "https://shop.example/wp-json/pronamic-pay/adyen/v1/payments/result/7"
            .to_string(),
    }
}

pub fn payment(method: Option<MethodTag>) -> Payment {
    Payment {
        id: "42".to_string(),
        total_amount: Some(Money::new(dec!(10.00), "EUR")),
        method,
        return_url: "https://shop.example/return/42".to_string(),
        pay_redirect_url: Some("https://shop.example/pay/42".to_string()),
        ..Default::default()
    }
}
