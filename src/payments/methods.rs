//! Mapping between host payment methods and Adyen payment method types

use serde::{Deserialize, Deserializer, Serialize};

/// Payment method identifier used by the host framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodTag {
    Bancontact,
    CreditCard,
    DirectDebit,
    Giropay,
    Ideal,
    Maestro,
    Sofort,
}

impl MethodTag {
    /// Methods this gateway can offer.
    pub const SUPPORTED: [MethodTag; 7] = [
        MethodTag::Bancontact,
        MethodTag::CreditCard,
        MethodTag::DirectDebit,
        MethodTag::Giropay,
        MethodTag::Ideal,
        MethodTag::Maestro,
        MethodTag::Sofort,
    ];

    /// Parse a host method identifier. Identifiers this gateway does not
    /// know give `None`.
    pub fn from_host(value: &str) -> Option<Self> {
        MethodTag::SUPPORTED.into_iter().find(|tag| tag.as_str() == value)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MethodTag::Bancontact => "bancontact",
            MethodTag::CreditCard => "credit_card",
            MethodTag::DirectDebit => "direct_debit",
            MethodTag::Giropay => "giropay",
            MethodTag::Ideal => "ideal",
            MethodTag::Maestro => "maestro",
            MethodTag::Sofort => "sofort",
        }
    }

    pub fn to_provider(self) -> PaymentMethodType {
        match self {
            MethodTag::Bancontact => PaymentMethodType::Bancontact,
            MethodTag::CreditCard => PaymentMethodType::Scheme,
            MethodTag::DirectDebit => PaymentMethodType::SepaDirectDebit,
            MethodTag::Giropay => PaymentMethodType::Giropay,
            MethodTag::Ideal => PaymentMethodType::Ideal,
            MethodTag::Maestro => PaymentMethodType::Maestro,
            MethodTag::Sofort => PaymentMethodType::DirectEbanking,
        }
    }
}

/// Deserialize an optional host method, reading unknown identifiers as
/// no method at all.
pub fn deserialize_host_method<'de, D>(deserializer: D) -> Result<Option<MethodTag>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(MethodTag::from_host))
}

/// Adyen payment method `type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethodType {
    #[serde(rename = "bcmc")]
    Bancontact,
    #[serde(rename = "scheme")]
    Scheme,
    #[serde(rename = "sepadirectdebit")]
    SepaDirectDebit,
    #[serde(rename = "giropay")]
    Giropay,
    #[serde(rename = "ideal")]
    Ideal,
    #[serde(rename = "maestro")]
    Maestro,
    #[serde(rename = "directEbanking")]
    DirectEbanking,
}

impl PaymentMethodType {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethodType::Bancontact => "bcmc",
            PaymentMethodType::Scheme => "scheme",
            PaymentMethodType::SepaDirectDebit => "sepadirectdebit",
            PaymentMethodType::Giropay => "giropay",
            PaymentMethodType::Ideal => "ideal",
            PaymentMethodType::Maestro => "maestro",
            PaymentMethodType::DirectEbanking => "directEbanking",
        }
    }

    /// Parse a `type` from the `/paymentMethods` listing.
    pub fn from_provider(value: &str) -> Option<Self> {
        match value {
            "bcmc" => Some(PaymentMethodType::Bancontact),
            "scheme" => Some(PaymentMethodType::Scheme),
            "sepadirectdebit" => Some(PaymentMethodType::SepaDirectDebit),
            "giropay" => Some(PaymentMethodType::Giropay),
            "ideal" => Some(PaymentMethodType::Ideal),
            "maestro" => Some(PaymentMethodType::Maestro),
            "directEbanking" => Some(PaymentMethodType::DirectEbanking),
            _ => None,
        }
    }

    pub fn to_host(self) -> MethodTag {
        match self {
            PaymentMethodType::Bancontact => MethodTag::Bancontact,
            PaymentMethodType::Scheme => MethodTag::CreditCard,
            PaymentMethodType::SepaDirectDebit => MethodTag::DirectDebit,
            PaymentMethodType::Giropay => MethodTag::Giropay,
            PaymentMethodType::Ideal => MethodTag::Ideal,
            PaymentMethodType::Maestro => MethodTag::Maestro,
            PaymentMethodType::DirectEbanking => MethodTag::Sofort,
        }
    }

    /// Types handled through the `/payments` redirect integration rather
    /// than a payment session.
    pub fn uses_api_integration(self) -> bool {
        matches!(
            self,
            PaymentMethodType::Ideal | PaymentMethodType::DirectEbanking
        )
    }
}

impl std::fmt::Display for PaymentMethodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
