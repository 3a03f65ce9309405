//! # Catalog Repository
//!
//! Four-layer data access hierarchy:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ProductRepository>       (store client interface)
//! ProductRepositoryImpl                 (repository impl, coordinates DAOs)
//!   ↓  Arc<dyn ProductDao>, Arc<dyn OrderItemDao>
//! MySqlProductDaoImpl / MySqlOrderItemDaoImpl
//!   ↓
//! MySQL
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   traits.rs                      ← ProductRepository trait
//!   pool.rs                        ← DatabasePool
//!   impl/
//!     product_repository_impl.rs   ← ProductRepositoryImpl
//!   dao/
//!     product_dao.rs               ← ProductDao trait
//!     order_item_dao.rs            ← OrderItemDao trait
//!     impl/mysql/                  ← SQLx implementations
//! ```

pub mod dao;
pub mod r#impl;
pub mod pool;
pub mod traits;

pub use dao::{MySqlOrderItemDaoImpl, MySqlProductDaoImpl, OrderItemDao, ProductDao};
pub use pool::*;
pub use r#impl::ProductRepositoryImpl;
pub use traits::*;
