//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings and UUIDs as hyphenated
//! lowercase strings. Enums use their upper-case wire form, except
//! [`StockAction`], which is stored as compact JSON.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use resq_core::{
  record::{InventoryRecord, Location, SectorType},
  reorder::{PurchaseOrder, Urgency},
  stock::{StockAction, StockChange},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enums ────────────────────────────────────────────────────────────────────

pub fn encode_sector(s: SectorType) -> &'static str {
  match s {
    SectorType::Hospital => "HOSPITAL",
    SectorType::Pds => "PDS",
    SectorType::Ngo => "NGO",
  }
}

pub fn decode_sector(s: &str) -> Result<SectorType> { Ok(SectorType::parse(s)?) }

pub fn decode_urgency(s: &str) -> Result<Urgency> {
  Urgency::from_str(s).map_err(|_| Error::Decode {
    column: "urgency_level",
    value:  s.to_owned(),
  })
}

pub fn encode_action(a: &StockAction) -> Result<String> {
  Ok(serde_json::to_string(a)?)
}

pub fn decode_action(s: &str) -> Result<StockAction> { Ok(serde_json::from_str(s)?) }

// ─── Raw row types ────────────────────────────────────────────────────────────

/// The `SELECT` column list matching [`RawRecord`]'s field order.
pub const RECORD_COLUMNS: &str = "inventory_id, organization_id, sector_type, \
  item_type, current_stock, daily_consumption_rate, reorder_point, \
  critical_threshold, location_city, location_state, location_country, \
  location_latitude, location_longitude, last_updated";

/// Flat representation of an `inventory` row before domain decoding.
pub struct RawRecord {
  pub inventory_id:           String,
  pub organization_id:        String,
  pub sector_type:            String,
  pub item_type:              String,
  pub current_stock:          f64,
  pub daily_consumption_rate: f64,
  pub reorder_point:          f64,
  pub critical_threshold:     f64,
  pub location_city:          String,
  pub location_state:         String,
  pub location_country:       String,
  pub location_latitude:      Option<f64>,
  pub location_longitude:     Option<f64>,
  pub last_updated:           String,
}

impl RawRecord {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      inventory_id:           row.get(0)?,
      organization_id:        row.get(1)?,
      sector_type:            row.get(2)?,
      item_type:              row.get(3)?,
      current_stock:          row.get(4)?,
      daily_consumption_rate: row.get(5)?,
      reorder_point:          row.get(6)?,
      critical_threshold:     row.get(7)?,
      location_city:          row.get(8)?,
      location_state:         row.get(9)?,
      location_country:       row.get(10)?,
      location_latitude:      row.get(11)?,
      location_longitude:     row.get(12)?,
      last_updated:           row.get(13)?,
    })
  }

  pub fn into_record(self) -> Result<InventoryRecord> {
    Ok(InventoryRecord {
      id:                     self.inventory_id,
      organization_id:        self.organization_id,
      sector_type:            decode_sector(&self.sector_type)?,
      item_type:              self.item_type,
      current_stock:          self.current_stock,
      daily_consumption_rate: self.daily_consumption_rate,
      reorder_point:          self.reorder_point,
      critical_threshold:     self.critical_threshold,
      location:               Location {
        city:      self.location_city,
        state:     self.location_state,
        country:   self.location_country,
        latitude:  self.location_latitude,
        longitude: self.location_longitude,
      },
      last_updated:           decode_dt(&self.last_updated)?,
    })
  }
}

pub struct RawStockChange {
  pub change_id:    String,
  pub inventory_id: String,
  pub action:       String,
  pub old_stock:    f64,
  pub new_stock:    f64,
  pub recorded_at:  String,
}

impl RawStockChange {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      change_id:    row.get(0)?,
      inventory_id: row.get(1)?,
      action:       row.get(2)?,
      old_stock:    row.get(3)?,
      new_stock:    row.get(4)?,
      recorded_at:  row.get(5)?,
    })
  }

  pub fn into_change(self) -> Result<StockChange> {
    Ok(StockChange {
      change_id:   decode_uuid(&self.change_id)?,
      record_id:   self.inventory_id,
      action:      decode_action(&self.action)?,
      old_stock:   self.old_stock,
      new_stock:   self.new_stock,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}

pub struct RawPurchaseOrder {
  pub order_id:           String,
  pub inventory_id:       String,
  pub quantity:           f64,
  pub urgency_level:      String,
  pub supplier_name:      Option<String>,
  pub reasoning:          String,
  pub auto_generated:     bool,
  pub estimated_delivery: String,
  pub created_at:         String,
}

impl RawPurchaseOrder {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      order_id:           row.get(0)?,
      inventory_id:       row.get(1)?,
      quantity:           row.get(2)?,
      urgency_level:      row.get(3)?,
      supplier_name:      row.get(4)?,
      reasoning:          row.get(5)?,
      auto_generated:     row.get(6)?,
      estimated_delivery: row.get(7)?,
      created_at:         row.get(8)?,
    })
  }

  pub fn into_order(self) -> Result<PurchaseOrder> {
    Ok(PurchaseOrder {
      order_id:           decode_uuid(&self.order_id)?,
      record_id:          self.inventory_id,
      quantity:           self.quantity,
      urgency:            decode_urgency(&self.urgency_level)?,
      supplier:           self.supplier_name,
      reasoning:          self.reasoning,
      auto_generated:     self.auto_generated,
      estimated_delivery: decode_dt(&self.estimated_delivery)?,
      created_at:         decode_dt(&self.created_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use resq_core::chaos::ChaosScenario;

  use super::*;

  #[test]
  fn sector_round_trips_through_wire_form() {
    for s in [SectorType::Hospital, SectorType::Pds, SectorType::Ngo] {
      assert_eq!(decode_sector(encode_sector(s)).unwrap(), s);
    }
    assert!(matches!(decode_sector("school"), Err(Error::Core(_))));
  }

  #[test]
  fn urgency_decodes_upper_case_only() {
    assert_eq!(decode_urgency("HIGH").unwrap(), Urgency::High);
    assert!(matches!(
      decode_urgency("high"),
      Err(Error::Decode { column: "urgency_level", .. })
    ));
  }

  #[test]
  fn chaos_action_is_json() {
    let a = StockAction::Chaos {
      scenario: ChaosScenario::Shortage,
    };
    let s = encode_action(&a).unwrap();
    assert_eq!(s, r#"{"kind":"chaos","scenario":"shortage"}"#);
    assert_eq!(decode_action(&s).unwrap(), a);
  }

  #[test]
  fn bad_timestamp_is_reported() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }
}
