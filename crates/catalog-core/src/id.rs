//! Typed ID wrappers for domain entities.

use crate::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Message used when an id path parameter is absent or blank.
pub const MISSING_ID_MESSAGE: &str = "The id parameter is required and cannot be empty.";

/// A strongly-typed wrapper for store-assigned product IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl ProductId {
    /// Creates a product ID from a raw integer.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parses a product ID from a request path segment.
    ///
    /// The segment must hold a positive integer; surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Result<Self, CatalogError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::invalid_argument(MISSING_ID_MESSAGE));
        }

        match trimmed.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(CatalogError::invalid_argument(format!(
                "The id parameter must be a positive integer, got '{trimmed}'."
            ))),
        }
    }

    /// Returns the inner integer.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ProductId> for i64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_product_id_parsing() {
        assert_eq!(ProductId::parse("42").unwrap(), ProductId::new(42));
        assert_eq!(ProductId::parse(" 7 ").unwrap().into_inner(), 7);
    }

    #[test]
    fn test_blank_id_is_invalid_argument() {
        for raw in ["", "   "] {
            let err = ProductId::parse(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert_eq!(err.to_string(), MISSING_ID_MESSAGE);
        }
    }

    #[test]
    fn test_non_positive_or_non_numeric_id_is_rejected() {
        for raw in ["0", "-3", "abc", "1.5"] {
            let err = ProductId::parse(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn test_product_id_display() {
        assert_eq!(ProductId::new(19).to_string(), "19");
    }
}
