//! Core types and trait definitions for the ResQ inventory monitor.
//!
//! This crate has no HTTP or database dependencies. It holds
//! the inventory data model, the risk classification rule, reorder planning,
//! chaos scenarios, and the [`store::InventoryStore`] abstraction that storage
//! backends implement.

pub mod chaos;
pub mod classify;
pub mod error;
pub mod record;
pub mod reorder;
pub mod sector;
pub mod stock;
pub mod store;

pub use error::{Error, Result};
