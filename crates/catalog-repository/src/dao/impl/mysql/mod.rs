//! MySQL DAO implementations.

mod order_item_dao_impl;
mod product_dao_impl;

pub use order_item_dao_impl::MySqlOrderItemDaoImpl;
pub use product_dao_impl::MySqlProductDaoImpl;
