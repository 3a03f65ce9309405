//! # Catalog Service
//!
//! Business logic for the product catalog: cache-aside reads, product
//! creation and best-seller rankings.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod notification;
pub mod product_service;

pub use cache::*;
pub use dto::*;
pub use notification::*;
pub use product_service::*;
pub use r#impl::{ProductServiceImpl, TOP_PRODUCTS_LIMIT};
