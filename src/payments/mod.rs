//! Adyen payment integration module
//!
//! Builds Checkout API requests from host payments, sends them through an
//! [`traits::AdyenApi`] transport and maps the answers back onto the host
//! payment as [`host::PaymentPatch`]es.

pub mod builder;
pub mod gateway;
pub mod host;
pub mod methods;
pub mod notifications;
pub mod providers;
pub mod reconciler;
pub mod traits;
pub mod types;
