//! HTTP client for the storefront backend.
//!
//! [`BackendClient`] wraps the JSON API the storefront talks to: auth,
//! catalog reads, order history, and the two payment endpoints behind
//! [`checkout::OrdersGateway`]. The wire module keeps the backend's
//! camelCase field names and rupee-number amounts out of the rest of the
//! workspace.

pub mod client;
pub mod config;
pub mod error;
mod wire;

pub use client::BackendClient;
pub use config::BackendConfig;
pub use error::{BackendError, Result};
