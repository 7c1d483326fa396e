use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::ProductRecord;

/// One cart line: a copy of the catalog record at the moment it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    pub product: ProductRecord,
    pub added_at: DateTime<Utc>,
}

/// The single implicit session's cart. Append-only: items are never
/// removed or reordered, matching the classroom flow where a pupil only
/// ever adds things before checking out.
#[derive(Debug, Default, Serialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, product: ProductRecord) {
        self.items.push(CartItem {
            product,
            added_at: Utc::now(),
        });
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all item prices in minor currency units.
    pub fn total(&self) -> u64 {
        self.items.iter().map(|i| i.product.price).sum()
    }
}
