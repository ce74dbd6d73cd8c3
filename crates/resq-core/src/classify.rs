//! Risk classification: days remaining and status tier for a record.
//!
//! Classification is a pure function of a record's stock, consumption rate and
//! critical threshold plus the process-wide warning window. It is computed on
//! every read and never stored, so it cannot drift from the source fields.
//!
//! Preconditions: `current_stock`, `daily_consumption_rate` and
//! `critical_threshold` are all `>= 0`. Violations are caught by
//! [`InventoryRecord::validate`] at the boundary and by `debug_assert!` here;
//! nothing is clamped.

use serde::{Deserialize, Serialize};

use crate::record::InventoryRecord;

/// Days of cover below which a non-critical record is flagged WARNING.
pub const DEFAULT_WARNING_WINDOW_DAYS: f64 = 7.0;

// ─── Policy ──────────────────────────────────────────────────────────────────

/// Process-wide classification settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifyPolicy {
  pub warning_window_days: f64,
}

impl Default for ClassifyPolicy {
  fn default() -> Self {
    Self {
      warning_window_days: DEFAULT_WARNING_WINDOW_DAYS,
    }
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Discrete risk tier. Variants are declared most severe first so that the
/// derived `Ord` sorts critical items to the front.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Status {
  Critical,
  Warning,
  Normal,
}

/// The derived view of a record: time to stockout and its tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
  /// `+inf` when the record is not consumed. Serialised as `null` in that
  /// case, since JSON has no infinity.
  #[serde(with = "unbounded_days")]
  pub days_remaining: f64,
  pub status:         Status,
}

/// A record bundled with its classification, as returned by read APIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
  #[serde(flatten)]
  pub record:         InventoryRecord,
  #[serde(flatten)]
  pub classification: Classification,
}

impl ClassifiedRecord {
  pub fn new(record: InventoryRecord, policy: &ClassifyPolicy) -> Self {
    let classification = classify(&record, policy);
    Self {
      record,
      classification,
    }
  }
}

// ─── Rule ────────────────────────────────────────────────────────────────────

/// `current_stock / daily_consumption_rate`, or `+inf` for a zero rate.
pub fn days_remaining(current_stock: f64, daily_consumption_rate: f64) -> f64 {
  debug_assert!(current_stock >= 0.0, "negative stock: {current_stock}");
  debug_assert!(
    daily_consumption_rate >= 0.0,
    "negative consumption rate: {daily_consumption_rate}"
  );

  if daily_consumption_rate > 0.0 {
    current_stock / daily_consumption_rate
  } else {
    f64::INFINITY
  }
}

/// Map days of cover to a tier. Both boundaries are inclusive on the low
/// side, and CRITICAL takes precedence over WARNING.
pub fn status_for(
  days_remaining: f64,
  critical_threshold: f64,
  policy: &ClassifyPolicy,
) -> Status {
  debug_assert!(
    critical_threshold >= 0.0,
    "negative critical threshold: {critical_threshold}"
  );

  if days_remaining.is_infinite() {
    Status::Normal
  } else if days_remaining <= critical_threshold {
    Status::Critical
  } else if days_remaining <= policy.warning_window_days {
    Status::Warning
  } else {
    Status::Normal
  }
}

pub fn classify(record: &InventoryRecord, policy: &ClassifyPolicy) -> Classification {
  let days = record.days_remaining();
  Classification {
    days_remaining: days,
    status:         status_for(days, record.critical_threshold, policy),
  }
}

// ─── Summary ─────────────────────────────────────────────────────────────────

/// Headline counts over a set of classified records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusSummary {
  pub total:               usize,
  pub critical:            usize,
  pub warning:             usize,
  pub normal:              usize,
  /// Mean over records with finite days remaining; `None` if there are none.
  pub mean_days_remaining: Option<f64>,
}

impl StatusSummary {
  pub fn from_classifications<'a>(
    items: impl IntoIterator<Item = &'a Classification>,
  ) -> Self {
    let mut summary = Self::default();
    let mut finite_sum = 0.0;
    let mut finite_count = 0usize;

    for c in items {
      summary.total += 1;
      match c.status {
        Status::Critical => summary.critical += 1,
        Status::Warning => summary.warning += 1,
        Status::Normal => summary.normal += 1,
      }
      if c.days_remaining.is_finite() {
        finite_sum += c.days_remaining;
        finite_count += 1;
      }
    }

    if finite_count > 0 {
      summary.mean_days_remaining = Some(finite_sum / finite_count as f64);
    }
    summary
  }
}

mod unbounded_days {
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S: Serializer>(days: &f64, s: S) -> Result<S::Ok, S::Error> {
    if days.is_finite() {
      s.serialize_some(days)
    } else {
      s.serialize_none()
    }
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::INFINITY))
  }
}
