//! # Catalog Server Library
//!
//! Dependency injection wiring, logging setup and the application
//! lifecycle for the catalog server binary.

pub mod app;
pub mod di;
pub mod startup;
pub mod telemetry;
