//! The `InventoryStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `resq-store-sqlite`).
//! Higher layers (`resq-api`, `resq-server`) depend on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::{
  record::{InventoryRecord, SectorType},
  reorder::PurchaseOrder,
  stock::{StockAction, StockChange},
};

/// Abstraction over an inventory store backend.
///
/// Records are keyed by `id` and inserted at most once: there is no upsert.
/// After insertion only the stock level changes, and every change is audited.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait InventoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Records ───────────────────────────────────────────────────────────

  /// Insert `record` unless its id is already taken.
  ///
  /// Returns `false` for a duplicate id; the stored record is left untouched.
  fn insert(
    &self,
    record: InventoryRecord,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<InventoryRecord>, Self::Error>> + Send + 'a;

  /// All records across every tenant.
  fn query_all(
    &self,
  ) -> impl Future<Output = Result<Vec<InventoryRecord>, Self::Error>> + Send + '_;

  /// Records owned by `organization_id`, and nothing else.
  fn query_by_organization<'a>(
    &'a self,
    organization_id: &'a str,
  ) -> impl Future<Output = Result<Vec<InventoryRecord>, Self::Error>> + Send + 'a;

  fn query_by_sector(
    &self,
    sector: SectorType,
  ) -> impl Future<Output = Result<Vec<InventoryRecord>, Self::Error>> + Send + '_;

  /// Remove every record, stock change and purchase order.
  fn clear(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Stock levels ──────────────────────────────────────────────────────

  /// Set a record's stock and bump its `last_updated`, auditing the change.
  ///
  /// Returns `None` if no record has this id.
  fn update_stock(
    &self,
    id: String,
    new_stock: f64,
    action: StockAction,
  ) -> impl Future<Output = Result<Option<StockChange>, Self::Error>> + Send + '_;

  /// The audit trail for one record, oldest first.
  fn stock_history<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Vec<StockChange>, Self::Error>> + Send + 'a;

  // ── Purchase orders ───────────────────────────────────────────────────

  fn record_purchase_order(
    &self,
    order: PurchaseOrder,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Orders, newest first, optionally restricted to one record.
  fn list_purchase_orders<'a>(
    &'a self,
    record_id: Option<&'a str>,
  ) -> impl Future<Output = Result<Vec<PurchaseOrder>, Self::Error>> + Send + 'a;
}
