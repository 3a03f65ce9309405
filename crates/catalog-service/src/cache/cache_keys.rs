//! Cache key generators.
//!
//! Key formats are shared with other readers of the same Redis instance
//! and must not change.

use catalog_core::{CatalogResult, ListingFilter};

/// Namespace for product listing keys.
pub const PRODUCTS_PREFIX: &str = "products:";

/// Namespace for top-product ranking keys.
pub const TOP_PRODUCTS_PREFIX: &str = "top-products:";

/// Generate the cache key for a product listing.
///
/// The filter is serialized as compact JSON with its fields in declaration
/// order and absent fields omitted.
pub fn products_listing(filter: &ListingFilter) -> CatalogResult<String> {
    Ok(format!("{PRODUCTS_PREFIX}{}", serde_json::to_string(filter)?))
}

/// Generate the cache key for the top products of an area.
///
/// The area is appended verbatim.
#[must_use]
pub fn top_products(area: &str) -> String {
    format!("{TOP_PRODUCTS_PREFIX}{area}")
}
