//! Host framework types
//!
//! The host owns the payment record. The gateway receives it by reference
//! and hands back a [`PaymentPatch`] describing the changes to apply.

use crate::payments::methods::{deserialize_host_method, MethodTag};
use crate::payments::types::{Address, Gender};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata key holding the checkout SDK version of a session payment.
pub const META_SDK_VERSION: &str = "sdkVersion";
/// Metadata key holding the payment session token of a session payment.
pub const META_PAYMENT_SESSION: &str = "paymentSessionToken";

/// Money as the host stores it: a decimal value in major units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub value: Decimal,
    pub currency: String,
}

impl Money {
    pub fn new(value: Decimal, currency: impl Into<String>) -> Self {
        Self {
            value,
            currency: currency.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerName {
    pub first_name: String,
    pub infix: Option<String>,
    pub last_name: String,
    pub gender: Option<Gender>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Locale such as `nl_NL` or `en-US`
    pub locale: Option<String>,
    pub ip_address: Option<String>,
    pub phone: Option<String>,
    pub name: Option<CustomerName>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Test,
    Live,
}

impl Mode {
    /// Context name used by Adyen's checkout hosts.
    pub fn context(self) -> &'static str {
        match self {
            Mode::Test => "test",
            Mode::Live => "live",
        }
    }
}

/// Host payment status as driven by this gateway.
///
/// `Pending` is the only non-terminal state; a later callback may still
/// move it to one of the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Authorized,
    Refused,
    Cancelled,
    Error,
}

impl PaymentStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

/// Payment record handed over by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub total_amount: Option<Money>,
    /// Unknown host methods read as `None`
    #[serde(default, deserialize_with = "deserialize_host_method")]
    pub method: Option<MethodTag>,
    /// Issuer selected for iDEAL
    pub issuer: Option<String>,
    pub customer: Option<Customer>,
    pub billing_address: Option<Address>,
    pub description: Option<String>,
    pub return_url: String,
    /// Host page that renders the checkout for session payments
    pub pay_redirect_url: Option<String>,
    pub mode: Mode,
    pub transaction_id: Option<String>,
    pub action_url: Option<String>,
    pub status: PaymentStatus,
    pub meta: BTreeMap<String, String>,
}

impl Payment {
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Apply a patch produced by the gateway.
    pub fn apply(&mut self, patch: PaymentPatch) {
        if let Some(transaction_id) = patch.transaction_id {
            self.transaction_id = Some(transaction_id);
        }
        if let Some(action_url) = patch.action_url {
            self.action_url = Some(action_url);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.meta.extend(patch.meta);
    }
}

/// Changes the gateway wants made to a [`Payment`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentPatch {
    pub transaction_id: Option<String>,
    pub action_url: Option<String>,
    pub status: Option<PaymentStatus>,
    pub meta: BTreeMap<String, String>,
    /// Notes for the payment's history; never change state
    pub notes: Vec<String>,
}

impl PaymentPatch {
    pub fn is_empty(&self) -> bool {
        self.transaction_id.is_none()
            && self.action_url.is_none()
            && self.status.is_none()
            && self.meta.is_empty()
            && self.notes.is_empty()
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// Capabilities the host runtime provides to the gateway.
pub trait HostEnvironment: Send + Sync {
    /// Site-wide locale used when the payment has no customer.
    fn current_locale(&self) -> String;

    /// Site origin passed to Adyen for session payments.
    fn home_url(&self) -> String;

    /// Endpoint the browser checkout posts its result payload to.
    fn payments_result_url(&self) -> String;
}

/// [`HostEnvironment`] backed by fixed values, e.g. from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StaticHost {
    pub locale: String,
    pub home_url: String,
    pub payments_result_url: String,
}

impl HostEnvironment for StaticHost {
    fn current_locale(&self) -> String {
        self.locale.clone()
    }

    fn home_url(&self) -> String {
        self.home_url.clone()
    }

    fn payments_result_url(&self) -> String {
        self.payments_result_url.clone()
    }
}
