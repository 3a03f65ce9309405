//! Product entity.

use crate::ProductId;
use serde::{Deserialize, Serialize};

/// A catalog product.
///
/// Identity is assigned by the store on insert and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Geographic or business region the product is sold in.
    pub area: String,
    /// Product category.
    pub category: String,
}

/// A product that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub area: String,
    pub category: String,
}

impl NewProduct {
    /// Creates a new unsaved product.
    #[must_use]
    pub fn new(name: impl Into<String>, area: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            area: area.into(),
            category: category.into(),
        }
    }

    /// Attaches the identifier the store assigned.
    #[must_use]
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            area: self.area,
            category: self.category,
        }
    }
}
