//! Client-side browse views over product snapshots.

use std::cmp::Ordering;

use common::UserId;
use serde::{Deserialize, Serialize};

use crate::product::{Category, ProductSnapshot};

/// Filter criteria for browsing products.
///
/// All criteria are optional and conjunctive. The free-text search matches
/// a case-insensitive substring of the name, description, category,
/// sub-category, or seller name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<Category>,
    pub sub_category: Option<String>,
    pub seller: Option<UserId>,
}

impl ProductFilter {
    /// Creates an empty filter that matches every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text search query.
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    /// Restricts results to a category.
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Restricts results to a sub-category (case-insensitive).
    pub fn sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }

    /// Restricts results to a seller.
    pub fn seller(mut self, seller: UserId) -> Self {
        self.seller = Some(seller);
        self
    }

    /// Returns true if the product passes every set criterion.
    pub fn matches(&self, product: &ProductSnapshot) -> bool {
        if let Some(ref query) = self.search {
            let q = query.to_lowercase();
            let hit = product.name.to_lowercase().contains(&q)
                || product.description.to_lowercase().contains(&q)
                || product.category.as_str().contains(&q)
                || product.sub_category.to_lowercase().contains(&q)
                || product.seller.name.to_lowercase().contains(&q);
            if !hit {
                return false;
            }
        }

        if let Some(category) = self.category
            && product.category != category
        {
            return false;
        }

        if let Some(ref sub) = self.sub_category
            && !product.sub_category.eq_ignore_ascii_case(sub)
        {
            return false;
        }

        if let Some(ref seller) = self.seller
            && &product.seller.id != seller
        {
            return false;
        }

        true
    }
}

/// Sort applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Featured products first, otherwise catalog order (stable).
    #[default]
    #[serde(rename = "featured")]
    Featured,

    /// Cheapest first.
    #[serde(rename = "price-asc")]
    PriceLowHigh,

    /// Most expensive first.
    #[serde(rename = "price-desc")]
    PriceHighLow,

    /// Highest rated first.
    #[serde(rename = "rating")]
    Rating,
}

impl SortOrder {
    /// Returns the wire/query value for this sort.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Featured => "featured",
            SortOrder::PriceLowHigh => "price-asc",
            SortOrder::PriceHighLow => "price-desc",
            SortOrder::Rating => "rating",
        }
    }

    fn sort(&self, products: &mut [ProductSnapshot]) {
        match self {
            SortOrder::Featured => {
                products.sort_by_key(|p| !p.is_featured);
            }
            SortOrder::PriceLowHigh => {
                products.sort_by_key(|p| p.price);
            }
            SortOrder::PriceHighLow => {
                products.sort_by_key(|p| std::cmp::Reverse(p.price));
            }
            SortOrder::Rating => {
                products.sort_by(|a, b| {
                    b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)
                });
            }
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Filters and sorts a product list for display.
pub fn browse(
    products: &[ProductSnapshot],
    filter: &ProductFilter,
    sort: SortOrder,
) -> Vec<ProductSnapshot> {
    let mut result: Vec<ProductSnapshot> = products
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect();
    sort.sort(&mut result);
    result
}

/// Returns up to `limit` products from the same category, excluding the
/// product itself.
pub fn related_products(
    products: &[ProductSnapshot],
    product: &ProductSnapshot,
    limit: usize,
) -> Vec<ProductSnapshot> {
    products
        .iter()
        .filter(|p| p.category == product.category && p.id != product.id)
        .take(limit)
        .cloned()
        .collect()
}
