//! Payment provider implementations
//!
//! Concrete implementations of the AdyenApi trait.

pub mod adyen;

pub use adyen::{AdyenClient, AdyenConfig, AdyenEnvironment};
