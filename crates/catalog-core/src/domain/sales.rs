//! Aggregated order data.

use crate::ProductId;
use serde::{Deserialize, Serialize};

/// Sum of ordered quantities for one product.
///
/// `total_quantity` is `None` when the store reports a null sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSales {
    pub product_id: ProductId,
    pub total_quantity: Option<i64>,
}

impl ProductSales {
    /// Creates a new sales aggregate.
    #[must_use]
    pub const fn new(product_id: ProductId, total_quantity: Option<i64>) -> Self {
        Self {
            product_id,
            total_quantity,
        }
    }

    /// Returns the summed quantity, treating a null sum as zero.
    #[must_use]
    pub fn total_or_zero(&self) -> i64 {
        self.total_quantity.unwrap_or(0)
    }
}
