mod common;

use adyen_gateway::error::GatewayError;
use adyen_gateway::payments::gateway::{Gateway, ReturnParams, SDK_VERSION};
use adyen_gateway::payments::host::{
    Mode, PaymentStatus, META_PAYMENT_SESSION, META_SDK_VERSION,
};
use adyen_gateway::payments::methods::{MethodTag, PaymentMethodType};
use adyen_gateway::payments::types::{
    DetailItem, InputDetail, PaymentMethodInfo, PaymentResponse, PaymentResultResponse,
    PaymentSessionResponse, Redirect, ResultCode,
};
use common::{host, payment, FakeAdyen};
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn gateway(fake: &Arc<FakeAdyen>) -> Gateway {
    Gateway::new(fake.clone(), Arc::new(host()), "ShopTest")
}

fn ideal_method(issuers: &[(&str, &str)]) -> PaymentMethodInfo {
    PaymentMethodInfo {
        method_type: "ideal".to_string(),
        name: Some("iDEAL".to_string()),
        details: Some(vec![InputDetail {
            key: "issuer".to_string(),
            detail_type: "select".to_string(),
            items: issuers
                .iter()
                .map(|(id, name)| DetailItem {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        }]),
    }
}

fn method(method_type: &str) -> PaymentMethodInfo {
    PaymentMethodInfo {
        method_type: method_type.to_string(),
        name: None,
        details: None,
    }
}

#[tokio::test]
async fn test_start_ideal_uses_redirect_integration() {
    let fake = Arc::new(FakeAdyen::default());
    *fake.payment.lock().unwrap() = Some(Ok(PaymentResponse {
        psp_reference: "8515".to_string(),
        result_code: Some(ResultCode::RedirectShopper),
        redirect: Some(Redirect {
            url: "https://test.adyen.com/hpp/redirectIdeal.shtml".to_string(),
            method: Some("GET".to_string()),
        }),
    }));

    let mut payment = payment(Some(MethodTag::Ideal));
    payment.issuer = Some("1121".to_string());

    let patch = gateway(&fake).start(&payment).await.unwrap();

    assert_eq!(patch.transaction_id.as_deref(), Some("8515"));
    assert_eq!(
        patch.action_url.as_deref(),
        Some("https://test.adyen.com/hpp/redirectIdeal.shtml")
    );
    assert!(patch.meta.is_empty());

    let requests = fake.payment_requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].payment_method.issuer.as_deref(), Some("1121"));
    assert_eq!(requests[0].details.country_code(), Some("NL"));
    assert!(fake.session_requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_start_sofort_without_redirect() {
    let fake = Arc::new(FakeAdyen::default());
    *fake.payment.lock().unwrap() = Some(Ok(PaymentResponse {
        psp_reference: "8516".to_string(),
        result_code: None,
        redirect: None,
    }));

    let patch = gateway(&fake)
        .start(&payment(Some(MethodTag::Sofort)))
        .await
        .unwrap();

    assert_eq!(patch.transaction_id.as_deref(), Some("8516"));
    assert_eq!(patch.action_url, None);
    assert_eq!(
        fake.payment_requests.lock().unwrap()[0].payment_method.method_type,
        PaymentMethodType::DirectEbanking
    );
}

#[tokio::test]
async fn test_start_card_uses_session_integration() {
    let fake = Arc::new(FakeAdyen::default());
    *fake.session.lock().unwrap() = Some(Ok(PaymentSessionResponse {
        payment_session_token: "eyJjaGVja291dHNob3BwZXJCYXNlVXJsIjoi".to_string(),
    }));

    let patch = gateway(&fake)
        .start(&payment(Some(MethodTag::CreditCard)))
        .await
        .unwrap();

    assert_eq!(patch.transaction_id, None);
    assert_eq!(patch.action_url.as_deref(), Some("https://shop.example/pay/42"));
    assert_eq!(
        patch.meta.get(META_SDK_VERSION).map(String::as_str),
        Some(SDK_VERSION)
    );
    assert_eq!(
        patch.meta.get(META_PAYMENT_SESSION).map(String::as_str),
        Some("eyJjaGVja291dHNob3BwZXJCYXNlVXJsIjoi")
    );

    let requests = fake.session_requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].origin, "https://shop.example");
    assert_eq!(
        requests[0].allowed_payment_methods,
        Some(vec![PaymentMethodType::Scheme])
    );
    assert!(fake.payment_requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_start_network_failure_leaves_payment_untouched() {
    let fake = Arc::new(FakeAdyen::default());
    *fake.payment.lock().unwrap() = Some(Err(GatewayError::transport("connection refused")));

    let payment = payment(Some(MethodTag::Ideal));
    let before = payment.clone();

    let err = gateway(&fake).start(&payment).await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport { .. }));

    // Nothing to apply, so the record is unchanged.
    assert_eq!(payment, before);
    assert_eq!(payment.transaction_id, None);
}

#[tokio::test]
async fn test_start_api_error_is_surfaced() {
    let fake = Arc::new(FakeAdyen::default());
    *fake.session.lock().unwrap() = Some(Err(GatewayError::api(
        403,
        "901",
        "Invalid Merchant Account",
    )));

    let err = gateway(&fake).start(&payment(None)).await.unwrap_err();
    assert_eq!(err, GatewayError::api(403, "901", "Invalid Merchant Account"));
}

#[tokio::test]
async fn test_start_invalid_amount_makes_no_call() {
    let fake = Arc::new(FakeAdyen::default());
    let mut payment = payment(Some(MethodTag::Ideal));
    payment.total_amount.as_mut().unwrap().currency = "ZZZ".to_string();

    let err = gateway(&fake).start(&payment).await.unwrap_err();
    assert!(matches!(err, GatewayError::InvalidAmount { .. }));
    assert!(fake.payment_requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_status_authorised() {
    let fake = Arc::new(FakeAdyen::default());
    *fake.result.lock().unwrap() = Some(Ok(PaymentResultResponse {
        psp_reference: "8515".to_string(),
        result_code: ResultCode::Authorised,
        merchant_reference: "42".to_string(),
        payment_method: Some("scheme".to_string()),
    }));

    let mut payment = payment(Some(MethodTag::CreditCard));
    let params = ReturnParams {
        payload: Some("Ab02b4c0!BQABAgCW5sxB4e/==".to_string()),
    };

    let patch = gateway(&fake).update_status(&payment, &params).await;
    payment.apply(patch);

    assert_eq!(fake.result_calls.load(Ordering::SeqCst), 1);
    assert_eq!(payment.status, PaymentStatus::Authorized);
    assert_eq!(payment.transaction_id.as_deref(), Some("8515"));
}

#[tokio::test]
async fn test_update_status_unknown_code_stays_pending() {
    let fake = Arc::new(FakeAdyen::default());
    *fake.result.lock().unwrap() = Some(Ok(PaymentResultResponse {
        psp_reference: "8515".to_string(),
        result_code: ResultCode::Other("Unheard".to_string()),
        merchant_reference: "42".to_string(),
        payment_method: None,
    }));

    let params = ReturnParams {
        payload: Some("opaque".to_string()),
    };
    let patch = gateway(&fake).update_status(&payment(None), &params).await;

    assert_eq!(patch.status, Some(PaymentStatus::Pending));
}

#[tokio::test]
async fn test_update_status_ignores_result_of_other_payment() {
    let fake = Arc::new(FakeAdyen::default());
    *fake.result.lock().unwrap() = Some(Ok(PaymentResultResponse {
        psp_reference: "9913".to_string(),
        result_code: ResultCode::Authorised,
        merchant_reference: "41".to_string(),
        payment_method: Some("scheme".to_string()),
    }));

    let params = ReturnParams {
        payload: Some("Ab02b4c0!BQABAgCW5sxB4e/==".to_string()),
    };
    let patch = gateway(&fake).update_status(&payment(None), &params).await;

    assert!(patch.is_empty());
}

#[tokio::test]
async fn test_update_status_without_payload_is_noop() {
    let fake = Arc::new(FakeAdyen::default());

    let patch = gateway(&fake)
        .update_status(&payment(None), &ReturnParams::default())
        .await;

    assert!(patch.is_empty());
    assert_eq!(fake.result_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_update_status_failure_adds_note() {
    let fake = Arc::new(FakeAdyen::default());
    *fake.result.lock().unwrap() = Some(Err(GatewayError::decode("missing field `resultCode`")));

    let params = ReturnParams {
        payload: Some("opaque".to_string()),
    };
    let patch = gateway(&fake).update_status(&payment(None), &params).await;

    assert_eq!(patch.status, None);
    assert_eq!(patch.transaction_id, None);
    assert_eq!(patch.notes.len(), 1);
    assert!(patch.notes[0].starts_with("Error getting payment result:"));
}

#[tokio::test]
async fn test_available_payment_methods() {
    let fake = Arc::new(FakeAdyen::default());
    *fake.methods.lock().unwrap() = Some(Ok(vec![
        method("scheme"),
        ideal_method(&[("1121", "Test Bank")]),
        method("alipay"),
        method("scheme"),
        method("directEbanking"),
    ]));

    let methods = gateway(&fake).get_available_payment_methods().await.unwrap();

    assert_eq!(
        methods,
        vec![MethodTag::CreditCard, MethodTag::Ideal, MethodTag::Sofort]
    );
}

#[tokio::test]
async fn test_get_issuers() {
    let fake = Arc::new(FakeAdyen::default());
    *fake.methods.lock().unwrap() = Some(Ok(vec![
        method("scheme"),
        ideal_method(&[("1121", "Test Bank")]),
    ]));

    let issuers = gateway(&fake).get_issuers().await.unwrap();
    let value = serde_json::to_value(&issuers).unwrap();

    assert_eq!(
        value,
        serde_json::json!([{ "options": { "1121": "Test Bank" } }])
    );
}

#[tokio::test]
async fn test_get_issuers_without_ideal() {
    let fake = Arc::new(FakeAdyen::default());
    *fake.methods.lock().unwrap() = Some(Ok(vec![method("scheme"), method("bcmc")]));

    assert!(gateway(&fake).get_issuers().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_issuers_propagates_errors() {
    let fake = Arc::new(FakeAdyen::default());

    let err = gateway(&fake).get_issuers().await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport { .. }));
}

#[tokio::test]
async fn test_checkout_config() {
    let fake = Arc::new(FakeAdyen::default());
    let gateway = gateway(&fake);

    let mut payment = payment(Some(MethodTag::CreditCard));
    assert!(gateway.checkout_config(&payment).is_none());

    payment.mode = Mode::Live;
    payment
        .meta
        .insert(META_SDK_VERSION.to_string(), "1.9.2".to_string());
    payment
        .meta
        .insert(META_PAYMENT_SESSION.to_string(), "session".to_string());

    let config = gateway.checkout_config(&payment).unwrap();
    let value = serde_json::to_value(&config).unwrap();

    assert_eq!(
        value["sdkScriptUrl"],
        "https://checkoutshopper-live.adyen.com/checkoutshopper/assets/js/sdk/checkoutSDK.1.9.2.min.js"
    );
    assert_eq!(
        value["paymentsResultUrl"],
        "https://shop.example/wp-json/pronamic-pay/adyen/v1/payments/result/7"
    );
    assert_eq!(value["paymentReturnUrl"], "https://shop.example/return/42");
    assert_eq!(value["paymentSession"], "session");
    assert_eq!(value["configObject"]["context"], "live");
}
