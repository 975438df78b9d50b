//! Request builder
//!
//! Turns a host [`Payment`] into either a `/payments` request (redirect
//! integration) or a `/paymentSession` request (SDK integration).

use crate::error::{GatewayError, GatewayResult};
use crate::payments::host::{HostEnvironment, Money, Payment};
use crate::payments::methods::PaymentMethodType;
use crate::payments::types::{
    Amount, ApiPaymentRequest, Gender, PaymentDetails, PaymentMethod, PaymentRequest,
    SessionRequest, ShopperName,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

/// Channel of session payments, rendered by the browser checkout.
pub const SESSION_CHANNEL: &str = "Web";

/// ISO 4217 currencies whose minor unit is not 2 decimals.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &[
    "BIF", "CLP", "CVE", "DJF", "GNF", "ISK", "JPY", "KMF", "KRW", "PYG", "RWF", "UGX", "VND",
    "VUV", "XAF", "XOF", "XPF",
];
const THREE_DECIMAL_CURRENCIES: &[&str] = &["BHD", "IQD", "JOD", "KWD", "LYD", "OMR", "TND"];
const TWO_DECIMAL_CURRENCIES: &[&str] = &[
    "AED", "ARS", "AUD", "BGN", "BRL", "CAD", "CHF", "CNY", "COP", "CZK", "DKK", "EGP", "EUR",
    "GBP", "GEL", "HKD", "HRK", "HUF", "IDR", "ILS", "INR", "KES", "MAD", "MXN", "MYR", "NGN",
    "NOK", "NZD", "PEN", "PHP", "PKR", "PLN", "QAR", "RON", "RSD", "RUB", "SAR", "SEK", "SGD",
    "THB", "TRY", "TWD", "UAH", "USD", "UYU", "ZAR",
];

/// Number of minor-unit decimals for a currency, `None` if unknown.
pub fn currency_exponent(currency: &str) -> Option<u32> {
    if ZERO_DECIMAL_CURRENCIES.contains(&currency) {
        Some(0)
    } else if THREE_DECIMAL_CURRENCIES.contains(&currency) {
        Some(3)
    } else if TWO_DECIMAL_CURRENCIES.contains(&currency) {
        Some(2)
    } else {
        None
    }
}

/// Convert host money to Adyen's minor-unit amount.
pub fn transform_amount(money: &Money) -> GatewayResult<Amount> {
    let currency = money.currency.trim().to_ascii_uppercase();

    let exponent = currency_exponent(&currency).ok_or_else(|| {
        GatewayError::invalid_amount(format!("unsupported currency '{}'", money.currency))
    })?;

    if money.value.is_sign_negative() && !money.value.is_zero() {
        return Err(GatewayError::invalid_amount(format!(
            "negative amount {} {}",
            money.value, currency
        )));
    }

    let minor = money
        .value
        .round_dp_with_strategy(exponent, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(Decimal::from(10_i64.pow(exponent)))
        .and_then(|minor| minor.to_i64())
        .ok_or_else(|| {
            GatewayError::invalid_amount(format!(
                "amount {} {} does not fit in minor units",
                money.value, currency
            ))
        })?;

    Ok(Amount::new(minor, currency))
}

/// Region subtag of a locale: `nl_NL` gives `NL`, `zh-Hant-TW` gives `TW`.
pub fn country_from_locale(locale: &str) -> Option<String> {
    let locale = locale.split(['.', '@']).next().unwrap_or_default();

    for subtag in locale.split(['_', '-']).skip(1) {
        match subtag.len() {
            2 if subtag.chars().all(|c| c.is_ascii_alphabetic()) => {
                return Some(subtag.to_ascii_uppercase());
            }
            3 if subtag.chars().all(|c| c.is_ascii_digit()) => return Some(subtag.to_string()),
            4 if subtag.chars().all(|c| c.is_ascii_alphabetic()) => continue,
            _ => return None,
        }
    }

    None
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Copy optional shopper fields from the payment onto the request.
pub fn complement(details: PaymentDetails, payment: &Payment) -> PaymentDetails {
    let details = details
        .with_billing_address(payment.billing_address.clone())
        .with_shopper_statement(non_empty(payment.description.as_ref()));

    let Some(customer) = &payment.customer else {
        return details;
    };

    let shopper_name = customer.name.as_ref().map(|name| ShopperName {
        first_name: name.first_name.clone(),
        last_name: name.last_name.clone(),
        infix: non_empty(name.infix.as_ref()),
        gender: name.gender.unwrap_or(Gender::Unknown),
    });

    details
        .with_shopper_ip(non_empty(customer.ip_address.as_ref()))
        .with_shopper_locale(non_empty(customer.locale.as_ref()))
        .with_shopper_name(shopper_name)
        .with_shopper_reference(non_empty(customer.user_id.as_ref()))
        .with_telephone_number(non_empty(customer.phone.as_ref()))
}

/// Builds Adyen requests for a merchant account.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    merchant_account: String,
    sdk_version: String,
}

impl RequestBuilder {
    pub fn new(merchant_account: impl Into<String>, sdk_version: impl Into<String>) -> Self {
        Self {
            merchant_account: merchant_account.into(),
            sdk_version: sdk_version.into(),
        }
    }

    pub fn sdk_version(&self) -> &str {
        &self.sdk_version
    }

    pub fn build(
        &self,
        payment: &Payment,
        host: &dyn HostEnvironment,
    ) -> GatewayResult<PaymentRequest> {
        let money = payment
            .total_amount
            .as_ref()
            .ok_or_else(|| GatewayError::invalid_amount("payment has no total amount"))?;
        let amount = transform_amount(money)?;

        let method_type = payment.method.map(|method| method.to_provider());

        // The customer's locale wins, even when it is empty.
        let locale = match &payment.customer {
            Some(customer) => customer.locale.clone().unwrap_or_default(),
            None => host.current_locale(),
        };
        let country_code = country_from_locale(&locale);

        let details = PaymentDetails::new(
            amount,
            self.merchant_account.as_str(),
            payment.id.as_str(),
            payment.return_url.as_str(),
        )?
        .with_country_code(country_code);
        let details = complement(details, payment);

        match method_type {
            Some(method_type) if method_type.uses_api_integration() => {
                let payment_method = match method_type {
                    PaymentMethodType::Ideal => {
                        PaymentMethod::ideal(non_empty(payment.issuer.as_ref()))
                    }
                    other => PaymentMethod::new(other),
                };

                debug!(
                    "Building API payment request: reference={}, method={}",
                    payment.id, method_type
                );

                Ok(PaymentRequest::Api(ApiPaymentRequest::new(
                    details,
                    payment_method,
                )))
            }
            _ => {
                debug!(
                    "Building payment session request: reference={}, method={:?}",
                    payment.id, method_type
                );

                let details = details.with_channel(Some(SESSION_CHANNEL.to_string()));
                let mut request = SessionRequest::new(details, host.home_url(), &self.sdk_version);
                if let Some(method_type) = method_type {
                    request = request.with_allowed_payment_methods(vec![method_type]);
                }

                Ok(PaymentRequest::Session(request))
            }
        }
    }
}
