//! Chaos drills: forced stock levels that push records into CRITICAL.
//!
//! A drill only decides the target stock level. Applying it is an ordinary
//! [`InventoryStore::update_stock`](crate::store::InventoryStore::update_stock)
//! tagged with [`StockAction::Chaos`](crate::stock::StockAction::Chaos), so it
//! shows up in the record's audit trail.

use serde::{Deserialize, Serialize};

use crate::{
  classify::{self, ClassifyPolicy},
  record::InventoryRecord,
  reorder,
};

/// Stock level left behind by [`ChaosScenario::Emergency`], unless the
/// critical boundary is lower.
pub const EMERGENCY_STOCK_LEVEL: f64 = 5.0;

/// How many records a global crisis knocks out when no limit is given.
pub const DEFAULT_GLOBAL_CRISIS_SIZE: usize = 3;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChaosScenario {
  /// Stock drops to zero.
  Stockout,
  /// Stock drops onto the critical boundary.
  Shortage,
  /// Stock drops to [`EMERGENCY_STOCK_LEVEL`] units, or to the critical
  /// boundary when that is lower.
  Emergency,
}

impl ChaosScenario {
  /// The stock level this scenario forces onto `record`.
  pub fn target_stock(self, record: &InventoryRecord) -> f64 {
    match self {
      Self::Stockout => 0.0,
      Self::Shortage => {
        shortage_stock(record.critical_threshold, record.daily_consumption_rate)
      }
      Self::Emergency => EMERGENCY_STOCK_LEVEL
        .min(shortage_stock(record.critical_threshold, record.daily_consumption_rate)),
    }
  }
}

/// `critical_threshold * rate`, nudged down until it classifies CRITICAL.
///
/// `critical_threshold * rate` can round so that dividing back by `rate` lands
/// one ulp above the threshold, or overflow to `+inf`. Start from the product
/// saturated to `f64::MAX` and step down until the quotient is on the boundary.
/// A zero rate never classifies CRITICAL, so the result is then `0`.
fn shortage_stock(critical_threshold: f64, rate: f64) -> f64 {
  let mut stock = (critical_threshold * rate).min(f64::MAX);
  while stock > 0.0 && classify::days_remaining(stock, rate) > critical_threshold {
    stock = next_below(stock);
  }
  stock
}

/// The next representable value below a positive finite `x`.
fn next_below(x: f64) -> f64 { f64::from_bits(x.to_bits() - 1) }

/// Pick up to `limit` records for a simultaneous stockout, most urgent first.
///
/// Selection follows the reorder priority order so repeated drills over the
/// same data hit the same records.
pub fn global_crisis_targets(
  records: Vec<InventoryRecord>,
  policy: &ClassifyPolicy,
  limit: usize,
) -> Vec<InventoryRecord> {
  reorder::priority_order(records, policy)
    .into_iter()
    .take(limit)
    .map(|classified| classified.record)
    .collect()
}
