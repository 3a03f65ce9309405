//! DAO implementations, organized by technology.

pub mod mysql;

pub use mysql::{MySqlOrderItemDaoImpl, MySqlProductDaoImpl};
