//! Adyen payment gateway adapter
//!
//! Starts payments through Adyen's redirect (`/payments`) or session
//! (`/paymentSession`) integration and reconciles the shopper's return.

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod config;
pub mod error;
pub mod payments;

pub use error::{GatewayError, GatewayResult};
pub use payments::gateway::{CheckoutConfig, Gateway, IssuerGroup, ReturnParams, SDK_VERSION};
pub use payments::host::{HostEnvironment, Payment, PaymentPatch, PaymentStatus};
pub use payments::methods::{MethodTag, PaymentMethodType};
pub use payments::providers::{AdyenClient, AdyenConfig, AdyenEnvironment};
pub use payments::traits::AdyenApi;
