//! Standard notification (webhook) verification
//!
//! Adyen signs every notification item with HMAC-SHA256 over a colon
//! separated signing string; the signature travels base64 encoded in
//! `additionalData.hmacSignature`.

use crate::error::{GatewayError, GatewayResult};
use crate::payments::host::PaymentStatus;
use crate::payments::types::Amount;
use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::collections::HashMap;

type HmacSha256 = Hmac<Sha256>;

/// Body Adyen posts to the notification endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    pub live: String,
    pub notification_items: Vec<NotificationItemWrapper>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationItemWrapper {
    #[serde(rename = "NotificationRequestItem")]
    pub item: NotificationItem,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationItem {
    #[serde(default)]
    pub additional_data: HashMap<String, String>,
    pub amount: Amount,
    pub event_code: String,
    #[serde(default)]
    pub event_date: Option<String>,
    pub merchant_account_code: String,
    pub merchant_reference: String,
    #[serde(default)]
    pub original_reference: Option<String>,
    pub psp_reference: String,
    #[serde(default)]
    pub reason: Option<String>,
    /// `"true"` or `"false"`
    pub success: String,
}

impl NotificationItem {
    pub fn signing_string(&self) -> String {
        let value = self.amount.value.to_string();
        [
            self.psp_reference.as_str(),
            self.original_reference.as_deref().unwrap_or_default(),
            self.merchant_account_code.as_str(),
            self.merchant_reference.as_str(),
            value.as_str(),
            self.amount.currency.as_str(),
            self.event_code.as_str(),
            self.success.as_str(),
        ]
        .join(":")
    }

    pub fn is_success(&self) -> bool {
        self.success.eq_ignore_ascii_case("true")
    }

    /// Host status implied by an `AUTHORISATION` event; other events say
    /// nothing about the payment status.
    pub fn authorisation_status(&self) -> Option<PaymentStatus> {
        if self.event_code != "AUTHORISATION" {
            return None;
        }

        Some(if self.is_success() {
            PaymentStatus::Authorized
        } else {
            PaymentStatus::Refused
        })
    }
}

/// Verify the `hmacSignature` of a notification item.
///
/// Returns `Ok(false)` for a missing or wrong signature and an error only
/// when the configured key itself is unusable.
pub fn verify_signature(item: &NotificationItem, hex_key: &str) -> GatewayResult<bool> {
    let key = hex::decode(hex_key.trim())
        .map_err(|e| GatewayError::config(format!("HMAC key is not valid hex: {}", e)))?;

    let Some(signature) = item.additional_data.get("hmacSignature") else {
        return Ok(false);
    };

    let Ok(signature) = STANDARD.decode(signature.trim()) else {
        return Ok(false);
    };

    let mut mac = HmacSha256::new_from_slice(&key)
        .map_err(|e| GatewayError::config(format!("Invalid HMAC key: {}", e)))?;
    mac.update(item.signing_string().as_bytes());

    // Constant-time comparison
    Ok(mac.verify_slice(&signature).is_ok())
}

/// Signature for a notification item, as Adyen would compute it.
pub fn sign(item: &NotificationItem, hex_key: &str) -> GatewayResult<String> {
    let key = hex::decode(hex_key.trim())
        .map_err(|e| GatewayError::config(format!("HMAC key is not valid hex: {}", e)))?;

    let mut mac = HmacSha256::new_from_slice(&key)
        .map_err(|e| GatewayError::config(format!("Invalid HMAC key: {}", e)))?;
    mac.update(item.signing_string().as_bytes());

    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "44782DEF547AAA06C910C43932B1EB0C71FC68D9D0C057550C48EC2ACF6BA056";

    fn item() -> NotificationItem {
        NotificationItem {
            additional_data: HashMap::new(),
            amount: Amount::new(1130, "EUR"),
            event_code: "AUTHORISATION".to_string(),
            event_date: Some("2019-05-06T17:15:34.121+02:00".to_string()),
            merchant_account_code: "TestMerchant".to_string(),
            merchant_reference: "TestPayment-1407325143704".to_string(),
            original_reference: None,
            psp_reference: "7914073381342284".to_string(),
            reason: None,
            success: "true".to_string(),
        }
    }

    #[test]
    fn test_signing_string() {
        assert_eq!(
            item().signing_string(),
            "7914073381342284::TestMerchant:TestPayment-1407325143704:1130:EUR:AUTHORISATION:true"
        );
    }

    #[test]
    fn test_signature_round_trip() {
        let mut item = item();
        let signature = sign(&item, KEY).unwrap();
        item.additional_data
            .insert("hmacSignature".to_string(), signature);

        assert!(verify_signature(&item, KEY).unwrap());
    }

    #[test]
    fn test_tampered_item_rejected() {
        let mut item = item();
        let signature = sign(&item, KEY).unwrap();
        item.additional_data
            .insert("hmacSignature".to_string(), signature);
        item.amount.value = 1;

        assert!(!verify_signature(&item, KEY).unwrap());
    }

    #[test]
    fn test_missing_or_garbled_signature() {
        let mut item = item();
        assert!(!verify_signature(&item, KEY).unwrap());

        item.additional_data
            .insert("hmacSignature".to_string(), "not base64!".to_string());
        assert!(!verify_signature(&item, KEY).unwrap());
    }

    #[test]
    fn test_invalid_key() {
        assert!(matches!(
            verify_signature(&item(), "zz"),
            Err(GatewayError::Config { .. })
        ));
    }

    #[test]
    fn test_authorisation_status() {
        let mut item = item();
        assert_eq!(item.authorisation_status(), Some(PaymentStatus::Authorized));
        item.success = "false".to_string();
        assert_eq!(item.authorisation_status(), Some(PaymentStatus::Refused));
        item.event_code = "REFUND".to_string();
        assert_eq!(item.authorisation_status(), None);
    }

    #[test]
    fn test_deserialize_notification() {
        let body = serde_json::json!({
            "live": "false",
            "notificationItems": [{
                "NotificationRequestItem": {
                    "additionalData": { "hmacSignature": "abc" },
                    "amount": { "value": 1130, "currency": "EUR" },
                    "eventCode": "AUTHORISATION",
                    "eventDate": "2019-05-06T17:15:34.121+02:00",
                    "merchantAccountCode": "TestMerchant",
                    "merchantReference": "42",
                    "pspReference": "7914073381342284",
                    "success": "true"
                }
            }]
        });

        let request: NotificationRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.notification_items.len(), 1);
        assert_eq!(request.notification_items[0].item.merchant_reference, "42");
    }
}
