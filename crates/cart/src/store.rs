use catalog::ProductSnapshot;
use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// One cart line: a product snapshot and how many of it the shopper wants.
///
/// The snapshot is captured at the moment the product is added, so the line
/// keeps rendering even if the catalog listing changes underneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: ProductSnapshot,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product: ProductSnapshot, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Price of the line, unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply(self.quantity)
    }
}

/// The shopping cart: an ordered collection of lines, at most one per product.
///
/// Lines keep their insertion order so the cart page renders stably while the
/// shopper edits quantities. Counts and totals are derived from the lines on
/// every call and are never stored, so they cannot drift from the lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of the product.
    ///
    /// If a line for the product already exists its quantity grows by one,
    /// otherwise a new line with quantity one is appended. Returns the
    /// resulting quantity of the product's line.
    pub fn add(&mut self, product: ProductSnapshot) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity += 1;
            line.quantity
        } else {
            self.lines.push(CartLine::new(product, 1));
            1
        }
    }

    /// Removes the product's line entirely. Unknown products are ignored.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.lines.retain(|l| &l.product.id != product_id);
    }

    /// Sets the quantity of the product's line.
    ///
    /// A quantity of zero removes the line, matching what removal does. If no
    /// line exists for the product nothing happens.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| &l.product.id == product_id) {
            line.quantity = quantity;
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product.id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct products in the cart.
    pub fn distinct_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all line totals, recomputed from the lines on every call.
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, l| acc + l.line_total())
    }

    /// The cart contents as (product, quantity) pairs, ready to be submitted
    /// as an order.
    pub fn order_items(&self) -> Vec<(ProductId, u32)> {
        self.lines
            .iter()
            .map(|l| (l.product.id.clone(), l.quantity))
            .collect()
    }
}
