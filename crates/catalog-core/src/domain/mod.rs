//! # Catalog Domain
//!
//! Entities and value objects of the product catalog.

pub mod product;
pub mod sales;

pub use product::*;
pub use sales::*;
