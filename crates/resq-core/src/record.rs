//! Inventory records, the unit of storage for every tenant.
//!
//! A record carries only source fields. Days remaining and risk status are
//! derived on read (see [`crate::classify`]) and never persisted.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Sector ──────────────────────────────────────────────────────────────────

/// The tenant category an organization belongs to.
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
  strum::EnumIter,
  strum::AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum SectorType {
  Hospital,
  /// Public distribution system ration shops.
  Pds,
  Ngo,
}

impl SectorType {
  /// Parse the upper-case wire form (`"HOSPITAL"`, `"PDS"`, `"NGO"`).
  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownSector(s.to_owned()))
  }
}

// ─── Location ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
  pub city:      String,
  pub state:     String,
  pub country:   String,
  #[serde(default)]
  pub latitude:  Option<f64>,
  #[serde(default)]
  pub longitude: Option<f64>,
}

impl Location {
  pub fn new(
    city: impl Into<String>,
    state: impl Into<String>,
    country: impl Into<String>,
  ) -> Self {
    Self {
      city:      city.into(),
      state:     state.into(),
      country:   country.into(),
      latitude:  None,
      longitude: None,
    }
  }

  pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
    self.latitude = Some(latitude);
    self.longitude = Some(longitude);
    self
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// One stocked item held by one organization at one location.
///
/// `id` is the store key and never changes after insertion. The only field a
/// store mutates after insertion is `current_stock` (and `last_updated` with
/// it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
  pub id:                     String,
  pub organization_id:        String,
  pub sector_type:            SectorType,
  pub item_type:              String,
  pub current_stock:          f64,
  pub daily_consumption_rate: f64,
  pub reorder_point:          f64,
  pub critical_threshold:     f64,
  pub location:               Location,
  pub last_updated:           DateTime<Utc>,
}

impl InventoryRecord {
  /// Stock divided by daily consumption; `+inf` when nothing is consumed.
  pub fn days_remaining(&self) -> f64 {
    crate::classify::days_remaining(self.current_stock, self.daily_consumption_rate)
  }

  /// Check the preconditions the classifier relies on.
  ///
  /// Values are never clamped; an out-of-domain record is rejected.
  pub fn validate(&self) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidRecord {
      id:     self.id.clone(),
      reason: reason.to_owned(),
    };

    if self.id.trim().is_empty() {
      return Err(invalid("id must not be empty"));
    }
    if self.organization_id.trim().is_empty() {
      return Err(invalid("organization_id must not be empty"));
    }

    let quantities = [
      ("current_stock", self.current_stock),
      ("daily_consumption_rate", self.daily_consumption_rate),
      ("reorder_point", self.reorder_point),
      ("critical_threshold", self.critical_threshold),
    ];
    for (name, value) in quantities {
      if !value.is_finite() {
        return Err(invalid(&format!("{name} must be finite")));
      }
      if value < 0.0 {
        return Err(invalid(&format!("{name} must be non-negative")));
      }
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record() -> InventoryRecord {
    InventoryRecord {
      id:                     "HOSP_001".into(),
      organization_id:        "ORG_HOSPITAL_001".into(),
      sector_type:            SectorType::Hospital,
      item_type:              "OXYGEN".into(),
      current_stock:          100.0,
      daily_consumption_rate: 10.0,
      reorder_point:          30.0,
      critical_threshold:     3.0,
      location:               Location::new("Bangalore", "Karnataka", "India"),
      last_updated:           Utc::now(),
    }
  }

  #[test]
  fn sector_wire_form_is_upper_case() {
    assert_eq!(SectorType::Pds.to_string(), "PDS");
    assert_eq!(SectorType::parse("NGO").unwrap(), SectorType::Ngo);
    assert_eq!(
      serde_json::to_string(&SectorType::Hospital).unwrap(),
      "\"HOSPITAL\""
    );
    assert!(matches!(
      SectorType::parse("school"),
      Err(Error::UnknownSector(s)) if s == "school"
    ));
  }

  #[test]
  fn valid_record_passes() {
    record().validate().unwrap();
  }

  #[test]
  fn zero_rate_is_valid() {
    let mut r = record();
    r.daily_consumption_rate = 0.0;
    r.validate().unwrap();
    assert!(r.days_remaining().is_infinite());
  }

  #[test]
  fn negative_stock_is_rejected() {
    let mut r = record();
    r.current_stock = -1.0;
    let err = r.validate().unwrap_err();
    assert!(err.to_string().contains("current_stock"));
  }

  #[test]
  fn nan_rate_is_rejected() {
    let mut r = record();
    r.daily_consumption_rate = f64::NAN;
    assert!(r.validate().is_err());
  }

  #[test]
  fn blank_organization_is_rejected() {
    let mut r = record();
    r.organization_id = "  ".into();
    assert!(r.validate().is_err());
  }
}
