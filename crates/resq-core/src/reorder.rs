//! Reorder planning: which records need restocking, how much, how urgently.
//!
//! Planning is pure. Turning a proposal into a [`PurchaseOrder`] needs a
//! supplier and a lead time, which the caller supplies (typically from the
//! external-conditions simulator).

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  classify::{ClassifiedRecord, ClassifyPolicy},
  record::InventoryRecord,
};

/// Days of consumption every order tops up on top of the deficit.
pub const SAFETY_STOCK_DAYS: f64 = 7.0;

/// Lead time assumed when no supplier can quote one.
pub const FALLBACK_LEAD_TIME_DAYS: i64 = 2;

// ─── Urgency ─────────────────────────────────────────────────────────────────

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
pub enum Urgency {
  Critical,
  High,
  Medium,
}

impl Urgency {
  pub fn from_days_remaining(days: f64) -> Self {
    if days <= 1.0 {
      Self::Critical
    } else if days <= 3.0 {
      Self::High
    } else {
      Self::Medium
    }
  }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

/// A record needs restocking once it is inside its critical window or at or
/// below its reorder point.
pub fn needs_reorder(record: &InventoryRecord) -> bool {
  record.days_remaining() <= record.critical_threshold
    || record.current_stock <= record.reorder_point
}

/// Safety stock plus whatever is missing to reach the reorder point.
pub fn recommended_quantity(record: &InventoryRecord) -> f64 {
  let safety_stock = record.daily_consumption_rate * SAFETY_STOCK_DAYS;
  let deficit = (record.reorder_point - record.current_stock).max(0.0);
  safety_stock + deficit
}

/// Sector priority first, then fewest days of cover, then id.
fn priority_cmp(a: &ClassifiedRecord, b: &ClassifiedRecord) -> Ordering {
  let pa = a.record.sector_type.config().priority_level;
  let pb = b.record.sector_type.config().priority_level;
  pa.cmp(&pb)
    .then_with(|| {
      a.classification
        .days_remaining
        .total_cmp(&b.classification.days_remaining)
    })
    .then_with(|| a.record.id.cmp(&b.record.id))
}

/// Classify `records` and sort them most urgent first.
pub fn priority_order(
  records: impl IntoIterator<Item = InventoryRecord>,
  policy: &ClassifyPolicy,
) -> Vec<ClassifiedRecord> {
  let mut classified: Vec<_> = records
    .into_iter()
    .map(|r| ClassifiedRecord::new(r, policy))
    .collect();
  classified.sort_by(priority_cmp);
  classified
}

// ─── Proposals ───────────────────────────────────────────────────────────────

/// A record that needs restocking, with the computed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderProposal {
  #[serde(flatten)]
  pub item:      ClassifiedRecord,
  pub quantity:  f64,
  pub urgency:   Urgency,
  pub reasoning: String,
}

impl ReorderProposal {
  /// `None` if the record does not need reordering.
  pub fn for_record(item: ClassifiedRecord) -> Option<Self> {
    if !needs_reorder(&item.record) {
      return None;
    }

    let record = &item.record;
    let days = item.classification.days_remaining;
    let quantity = recommended_quantity(record);
    let safety_stock = record.daily_consumption_rate * SAFETY_STOCK_DAYS;
    let reasoning = format!(
      "{days:.1} days remaining. Current stock ({}) against reorder point ({}). \
       Recommended safety stock: {safety_stock:.0} units.",
      record.current_stock, record.reorder_point,
    );

    Some(Self {
      urgency: Urgency::from_days_remaining(days),
      quantity,
      reasoning,
      item,
    })
  }
}

/// Every record that needs reordering, most urgent first.
pub fn proposals(
  records: impl IntoIterator<Item = InventoryRecord>,
  policy: &ClassifyPolicy,
) -> Vec<ReorderProposal> {
  priority_order(records, policy)
    .into_iter()
    .filter_map(ReorderProposal::for_record)
    .collect()
}

// ─── Orders ──────────────────────────────────────────────────────────────────

/// An approved reorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
  pub order_id:           Uuid,
  pub record_id:          String,
  pub quantity:           f64,
  pub urgency:            Urgency,
  /// Vendor name; `None` when no vendor currently serves the location.
  pub supplier:           Option<String>,
  pub reasoning:          String,
  pub auto_generated:     bool,
  pub estimated_delivery: DateTime<Utc>,
  pub created_at:         DateTime<Utc>,
}

impl PurchaseOrder {
  /// Approve `proposal`. Without a `lead_time` the fallback of
  /// [`FALLBACK_LEAD_TIME_DAYS`] applies.
  pub fn approve(
    proposal: ReorderProposal,
    supplier: Option<String>,
    lead_time: Option<Duration>,
    now: DateTime<Utc>,
  ) -> Self {
    let lead_time =
      lead_time.unwrap_or_else(|| Duration::days(FALLBACK_LEAD_TIME_DAYS));
    Self {
      order_id: Uuid::new_v4(),
      record_id: proposal.item.record.id,
      quantity: proposal.quantity,
      urgency: proposal.urgency,
      supplier,
      reasoning: proposal.reasoning,
      auto_generated: true,
      estimated_delivery: now + lead_time,
      created_at: now,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::record::{Location, SectorType};

  fn record(
    id: &str,
    sector: SectorType,
    stock: f64,
    rate: f64,
    reorder_point: f64,
  ) -> InventoryRecord {
    InventoryRecord {
      id:                     id.into(),
      organization_id:        "ORG".into(),
      sector_type:            sector,
      item_type:              "OXYGEN".into(),
      current_stock:          stock,
      daily_consumption_rate: rate,
      reorder_point,
      critical_threshold:     3.0,
      location:               Location::new("Chennai", "Tamil Nadu", "India"),
      last_updated:           Utc::now(),
    }
  }

  #[test]
  fn urgency_bands() {
    assert_eq!(Urgency::from_days_remaining(0.0), Urgency::Critical);
    assert_eq!(Urgency::from_days_remaining(1.0), Urgency::Critical);
    assert_eq!(Urgency::from_days_remaining(3.0), Urgency::High);
    assert_eq!(Urgency::from_days_remaining(3.5), Urgency::Medium);
    assert_eq!(Urgency::from_days_remaining(f64::INFINITY), Urgency::Medium);
  }

  #[test]
  fn reorder_triggers() {
    // Inside the critical window, above the reorder point.
    assert!(needs_reorder(&record("a", SectorType::Hospital, 25.0, 10.0, 10.0)));
    // At the reorder point, plenty of days.
    assert!(needs_reorder(&record("b", SectorType::Hospital, 30.0, 1.0, 30.0)));
    // Neither.
    assert!(!needs_reorder(&record("c", SectorType::Hospital, 100.0, 10.0, 30.0)));
    // Unconsumed and above the reorder point.
    assert!(!needs_reorder(&record("d", SectorType::Ngo, 50.0, 0.0, 15.0)));
  }

  #[test]
  fn quantity_is_safety_stock_plus_deficit() {
    let r = record("a", SectorType::Hospital, 10.0, 10.0, 30.0);
    assert_eq!(recommended_quantity(&r), 70.0 + 20.0);

    let r = record("b", SectorType::Hospital, 25.0, 10.0, 10.0);
    assert_eq!(recommended_quantity(&r), 70.0);
  }

  #[test]
  fn proposals_skip_healthy_and_sort_by_priority() {
    let records = vec![
      record("pds", SectorType::Pds, 0.0, 25.0, 100.0),
      record("healthy", SectorType::Hospital, 500.0, 10.0, 30.0),
      record("hosp", SectorType::Hospital, 20.0, 10.0, 30.0),
    ];
    let ps = proposals(records, &ClassifyPolicy::default());
    let ids: Vec<_> = ps.iter().map(|p| p.item.record.id.as_str()).collect();
    assert_eq!(ids, ["hosp", "pds"]);
    assert_eq!(ps[0].urgency, Urgency::High);
    assert_eq!(ps[1].urgency, Urgency::Critical);
    assert!(ps[0].reasoning.starts_with("2.0 days remaining"));
  }

  #[test]
  fn approval_uses_fallback_lead_time() {
    let r = record("hosp", SectorType::Hospital, 0.0, 10.0, 30.0);
    let proposal = ReorderProposal::for_record(ClassifiedRecord::new(
      r,
      &ClassifyPolicy::default(),
    ))
    .unwrap();
    let now = Utc::now();
    let order = PurchaseOrder::approve(proposal, None, None, now);
    assert_eq!(order.record_id, "hosp");
    assert_eq!(order.quantity, 100.0);
    assert_eq!(order.estimated_delivery - now, Duration::days(2));
    assert!(order.auto_generated);
  }

  #[test]
  fn approval_honours_quoted_lead_time() {
    let r = record("hosp", SectorType::Hospital, 0.0, 10.0, 30.0);
    let proposal = ReorderProposal::for_record(ClassifiedRecord::new(
      r,
      &ClassifyPolicy::default(),
    ))
    .unwrap();
    let now = Utc::now();
    let order = PurchaseOrder::approve(
      proposal,
      Some("Blinkit".into()),
      Some(Duration::minutes(27)),
      now,
    );
    assert_eq!(order.supplier.as_deref(), Some("Blinkit"));
    assert_eq!(order.estimated_delivery - now, Duration::minutes(27));
  }
}
