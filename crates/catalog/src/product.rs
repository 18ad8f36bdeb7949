//! Product snapshot types.

use common::{Money, ProductId, UserId};
use serde::{Deserialize, Serialize};

/// Top-level product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Jewellery,
    Saree,
}

impl Category {
    /// Returns the category name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Jewellery => "jewellery",
            Category::Saree => "saree",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The seller a product belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerRef {
    pub id: UserId,
    pub name: String,
}

/// Immutable snapshot of a product as fetched from the catalog service.
///
/// Cart lines embed the snapshot taken at add time; pricing at checkout is
/// recomputed server-side, so a stale snapshot only affects display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub sub_category: String,
    pub price: Money,
    pub original_price: Option<Money>,
    pub description: String,
    pub images: Vec<String>,
    pub seller: SellerRef,
    pub stock: u32,
    pub rating: f32,
    pub review_count: u32,
    pub is_featured: bool,
}

impl ProductSnapshot {
    /// Returns the discount percentage against the original price,
    /// rounded to the nearest whole percent. Zero when there is no
    /// original price or no markdown.
    pub fn discount_percent(&self) -> u32 {
        match self.original_price {
            Some(original) if original.is_positive() && original > self.price => {
                let saved = (original - self.price).paise() as f64;
                (saved / original.paise() as f64 * 100.0).round() as u32
            }
            _ => 0,
        }
    }

    /// Returns the first image URL, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
