//! Adyen request and response types
//!
//! Field names follow the Checkout API (v41) JSON schema. Optional fields are
//! skipped when unset so no `null` keys reach the provider.

use crate::error::{GatewayError, GatewayResult};
use crate::payments::methods::PaymentMethodType;
use serde::{Deserialize, Serialize};

/// Maximum length Adyen accepts for a merchant reference.
pub const MAX_REFERENCE_LENGTH: usize = 80;

/// Amount in minor units of `currency`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub value: i64,
    pub currency: String,
}

impl Amount {
    pub fn new(value: i64, currency: impl Into<String>) -> Self {
        Self {
            value,
            currency: currency.into(),
        }
    }
}

/// Postal address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// ISO 3166-1 alpha-2 country code
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_number_or_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_or_province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

/// The shopper's full name and gender (if specified)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopperName {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infix: Option<String>,
    pub gender: Gender,
}

/// Payment method selected for a direct (redirect) payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentMethod {
    #[serde(rename = "type")]
    pub method_type: PaymentMethodType,
    /// iDEAL issuer (bank) id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

impl PaymentMethod {
    pub fn new(method_type: PaymentMethodType) -> Self {
        Self {
            method_type,
            issuer: None,
        }
    }

    pub fn ideal(issuer: Option<String>) -> Self {
        Self {
            method_type: PaymentMethodType::Ideal,
            issuer,
        }
    }
}

/// Fields shared by the `/payments` and `/paymentSession` requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    billing_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country_code: Option<String>,
    merchant_account: String,
    reference: String,
    return_url: String,
    #[serde(rename = "shopperIP", skip_serializing_if = "Option::is_none")]
    shopper_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shopper_locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shopper_name: Option<ShopperName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shopper_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shopper_statement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    telephone_number: Option<String>,
}

impl PaymentDetails {
    /// Create the mandatory part of a request.
    ///
    /// Merchant account, reference and return URL must be non-empty and the
    /// reference may not exceed [`MAX_REFERENCE_LENGTH`] characters.
    pub fn new(
        amount: Amount,
        merchant_account: impl Into<String>,
        reference: impl Into<String>,
        return_url: impl Into<String>,
    ) -> GatewayResult<Self> {
        let merchant_account = merchant_account.into();
        let reference = reference.into();
        let return_url = return_url.into();

        if merchant_account.trim().is_empty() {
            return Err(GatewayError::invalid_request("merchant account is required"));
        }
        if reference.trim().is_empty() {
            return Err(GatewayError::invalid_request("reference is required"));
        }
        if reference.chars().count() > MAX_REFERENCE_LENGTH {
            return Err(GatewayError::invalid_request(format!(
                "reference exceeds {} characters",
                MAX_REFERENCE_LENGTH
            )));
        }
        if return_url.trim().is_empty() {
            return Err(GatewayError::invalid_request("return URL is required"));
        }

        Ok(Self {
            amount,
            billing_address: None,
            channel: None,
            country_code: None,
            merchant_account,
            reference,
            return_url,
            shopper_ip: None,
            shopper_locale: None,
            shopper_name: None,
            shopper_reference: None,
            shopper_statement: None,
            telephone_number: None,
        })
    }

    pub fn with_billing_address(mut self, address: Option<Address>) -> Self {
        self.billing_address = address;
        self
    }

    pub fn with_channel(mut self, channel: Option<String>) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_country_code(mut self, country_code: Option<String>) -> Self {
        self.country_code = country_code;
        self
    }

    pub fn with_shopper_ip(mut self, shopper_ip: Option<String>) -> Self {
        self.shopper_ip = shopper_ip;
        self
    }

    pub fn with_shopper_locale(mut self, shopper_locale: Option<String>) -> Self {
        self.shopper_locale = shopper_locale;
        self
    }

    pub fn with_shopper_name(mut self, shopper_name: Option<ShopperName>) -> Self {
        self.shopper_name = shopper_name;
        self
    }

    pub fn with_shopper_reference(mut self, shopper_reference: Option<String>) -> Self {
        self.shopper_reference = shopper_reference;
        self
    }

    pub fn with_shopper_statement(mut self, shopper_statement: Option<String>) -> Self {
        self.shopper_statement = shopper_statement;
        self
    }

    pub fn with_telephone_number(mut self, telephone_number: Option<String>) -> Self {
        self.telephone_number = telephone_number;
        self
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    pub fn billing_address(&self) -> Option<&Address> {
        self.billing_address.as_ref()
    }

    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    pub fn merchant_account(&self) -> &str {
        &self.merchant_account
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn return_url(&self) -> &str {
        &self.return_url
    }

    pub fn shopper_ip(&self) -> Option<&str> {
        self.shopper_ip.as_deref()
    }

    pub fn shopper_locale(&self) -> Option<&str> {
        self.shopper_locale.as_deref()
    }

    pub fn shopper_name(&self) -> Option<&ShopperName> {
        self.shopper_name.as_ref()
    }

    pub fn shopper_reference(&self) -> Option<&str> {
        self.shopper_reference.as_deref()
    }

    pub fn shopper_statement(&self) -> Option<&str> {
        self.shopper_statement.as_deref()
    }

    pub fn telephone_number(&self) -> Option<&str> {
        self.telephone_number.as_deref()
    }
}

/// Request body for `POST /payments` (redirect integration)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPaymentRequest {
    #[serde(flatten)]
    pub details: PaymentDetails,
    pub payment_method: PaymentMethod,
}

impl ApiPaymentRequest {
    pub fn new(details: PaymentDetails, payment_method: PaymentMethod) -> Self {
        Self {
            details,
            payment_method,
        }
    }
}

/// Request body for `POST /paymentSession` (SDK integration)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    #[serde(flatten)]
    pub details: PaymentDetails,
    pub origin: String,
    pub sdk_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_payment_methods: Option<Vec<PaymentMethodType>>,
}

impl SessionRequest {
    pub fn new(
        details: PaymentDetails,
        origin: impl Into<String>,
        sdk_version: impl Into<String>,
    ) -> Self {
        Self {
            details,
            origin: origin.into(),
            sdk_version: sdk_version.into(),
            allowed_payment_methods: None,
        }
    }

    pub fn with_allowed_payment_methods(mut self, methods: Vec<PaymentMethodType>) -> Self {
        self.allowed_payment_methods = Some(methods);
        self
    }
}

/// Outcome of the Request Builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentRequest {
    Api(ApiPaymentRequest),
    Session(SessionRequest),
}

impl PaymentRequest {
    pub fn details(&self) -> &PaymentDetails {
        match self {
            PaymentRequest::Api(request) => &request.details,
            PaymentRequest::Session(request) => &request.details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Redirect {
    pub url: String,
    #[serde(default)]
    pub method: Option<String>,
}

/// Response of `POST /payments`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub psp_reference: String,
    #[serde(default)]
    pub result_code: Option<ResultCode>,
    #[serde(default)]
    pub redirect: Option<Redirect>,
}

/// Response of `POST /paymentSession`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentSessionResponse {
    #[serde(rename = "paymentSession")]
    pub payment_session_token: String,
}

/// Request body for `POST /payments/result`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResultRequest {
    pub payload: String,
}

impl PaymentResultRequest {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

/// Response of `POST /payments/result`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResultResponse {
    pub psp_reference: String,
    pub result_code: ResultCode,
    pub merchant_reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

/// Adyen `resultCode`. Codes this crate does not know are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResultCode {
    Authorised,
    Refused,
    Cancelled,
    Error,
    Pending,
    Received,
    RedirectShopper,
    IdentifyShopper,
    ChallengeShopper,
    PresentToShopper,
    Other(String),
}

impl ResultCode {
    pub fn as_str(&self) -> &str {
        match self {
            ResultCode::Authorised => "Authorised",
            ResultCode::Refused => "Refused",
            ResultCode::Cancelled => "Cancelled",
            ResultCode::Error => "Error",
            ResultCode::Pending => "Pending",
            ResultCode::Received => "Received",
            ResultCode::RedirectShopper => "RedirectShopper",
            ResultCode::IdentifyShopper => "IdentifyShopper",
            ResultCode::ChallengeShopper => "ChallengeShopper",
            ResultCode::PresentToShopper => "PresentToShopper",
            ResultCode::Other(code) => code,
        }
    }
}

impl From<String> for ResultCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "Authorised" => ResultCode::Authorised,
            "Refused" => ResultCode::Refused,
            "Cancelled" => ResultCode::Cancelled,
            "Error" => ResultCode::Error,
            "Pending" => ResultCode::Pending,
            "Received" => ResultCode::Received,
            "RedirectShopper" => ResultCode::RedirectShopper,
            "IdentifyShopper" => ResultCode::IdentifyShopper,
            "ChallengeShopper" => ResultCode::ChallengeShopper,
            "PresentToShopper" => ResultCode::PresentToShopper,
            _ => ResultCode::Other(code),
        }
    }
}

impl From<ResultCode> for String {
    fn from(code: ResultCode) -> Self {
        code.as_str().to_string()
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body for `POST /paymentMethods`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodsRequest {
    pub merchant_account: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

/// Selectable item of an input detail, e.g. an iDEAL issuer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DetailItem {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputDetail {
    pub key: String,
    #[serde(rename = "type")]
    pub detail_type: String,
    #[serde(default)]
    pub items: Vec<DetailItem>,
}

/// Entry of the `/paymentMethods` listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentMethodInfo {
    #[serde(rename = "type")]
    pub method_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub details: Option<Vec<InputDetail>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodsResponse {
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethodInfo>,
}
