//! Shared types for the storefront core.
//!
//! This crate provides the identifier newtypes, the [`Money`] type used for
//! all rupee amounts, and the [`Route`] names the core needs for redirects.

pub mod ids;
pub mod money;
pub mod route;

pub use ids::{FlightId, OrderId, ProductId, UserId};
pub use money::Money;
pub use route::Route;
