//! Catalog read model for the storefront.
//!
//! Products arrive from the catalog service as immutable snapshots; this
//! crate holds the snapshot types plus the client-side browse logic
//! (filtering, sorting, related products) applied on top of them.

pub mod product;
pub mod views;

pub use product::{Category, ProductSnapshot, SellerRef};
pub use views::{ProductFilter, SortOrder, browse, related_products};
