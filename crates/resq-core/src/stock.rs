//! Stock-level changes and their audit trail.
//!
//! Every mutation of `current_stock` after insertion produces one
//! [`StockChange`], written by the store in the same transaction as the update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chaos::ChaosScenario;

/// Why a record's stock level was changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StockAction {
  /// An ordinary stock count or correction.
  #[default]
  ManualUpdate,
  /// A forced value from a chaos drill.
  Chaos { scenario: ChaosScenario },
}

impl StockAction {
  pub fn is_chaos(&self) -> bool { matches!(self, Self::Chaos { .. }) }
}

/// One audited stock mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockChange {
  pub change_id:   Uuid,
  pub record_id:   String,
  pub action:      StockAction,
  pub old_stock:   f64,
  pub new_stock:   f64,
  pub recorded_at: DateTime<Utc>,
}
