//! DAO (Data Access Object) layer.
//!
//! DAOs provide low-level, single-table data access abstractions.
//!
//! Hierarchy:
//! ```text
//! Service → Repository (interface + impl) → DAO (interface + impl) → DB
//! ```

pub mod r#impl;
pub mod order_item_dao;
pub mod product_dao;

pub use order_item_dao::OrderItemDao;
pub use product_dao::ProductDao;
pub use r#impl::{MySqlOrderItemDaoImpl, MySqlProductDaoImpl};
