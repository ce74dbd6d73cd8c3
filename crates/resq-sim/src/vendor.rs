//! Simulated quick-commerce vendor availability.
//!
//! Each vendor has one fixed base profile. A query for a specific location
//! narrows an `Available` profile to [`VendorStatus::NotAvailableInLocation`]
//! when the location is outside the vendor's coverage. Narrowing always works
//! on a copy; the base profiles are constants.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::City;

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
pub enum Vendor {
  Blinkit,
  Dunzo,
  Zepto,
  #[serde(rename = "Swiggy_Instamart")]
  #[strum(serialize = "Swiggy_Instamart")]
  SwiggyInstamart,
  BigBasket,
}

impl Vendor {
  pub const ALL: [Vendor; 5] = [
    Vendor::Blinkit,
    Vendor::Dunzo,
    Vendor::Zepto,
    Vendor::SwiggyInstamart,
    Vendor::BigBasket,
  ];

  pub fn resolve(name: &str) -> Option<Self> { Self::from_str(name).ok() }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum VendorStatus {
  Available,
  Offline,
  Unknown,
  #[serde(rename = "Not_Available_In_Location")]
  #[strum(serialize = "Not_Available_In_Location")]
  NotAvailableInLocation,
}

/// Availability and performance of one vendor, optionally at one location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VendorSnapshot {
  pub status:                VendorStatus,
  pub latency_ms:            u32,
  /// `None` whenever the vendor cannot deliver.
  pub delivery_time_minutes: Option<u32>,
  /// In `[0, 1]`.
  pub reliability_score:     f64,
  pub coverage_areas:        &'static [City],
  /// In `[0, 1]`.
  pub capacity_utilization:  f64,
}

/// Returned for any vendor name without its own profile.
pub const UNKNOWN_VENDOR: VendorSnapshot = VendorSnapshot {
  status:                VendorStatus::Unknown,
  latency_ms:            999,
  delivery_time_minutes: None,
  reliability_score:     0.0,
  coverage_areas:        &[],
  capacity_utilization:  0.0,
};

impl VendorSnapshot {
  pub fn covers(&self, location: &str) -> bool {
    self.coverage_areas.iter().any(|c| c.as_ref() == location)
  }

  /// Apply the location rule to a copy of `self`.
  ///
  /// Only an `Available` snapshot is narrowed; an empty location counts as no
  /// location.
  pub fn at_location(self, location: Option<&str>) -> Self {
    match location {
      Some(loc)
        if !loc.is_empty()
          && self.status == VendorStatus::Available
          && !self.covers(loc) =>
      {
        Self {
          status: VendorStatus::NotAvailableInLocation,
          delivery_time_minutes: None,
          ..self
        }
      }
      _ => self,
    }
  }
}

/// The base profile for `vendor`, before any location rule.
pub const fn vendor_profile(vendor: Vendor) -> VendorSnapshot {
  match vendor {
    Vendor::Blinkit => VendorSnapshot {
      status:                VendorStatus::Available,
      latency_ms:            12,
      delivery_time_minutes: Some(15),
      reliability_score:     0.95,
      coverage_areas:        &[City::Bangalore, City::Delhi, City::Mumbai],
      capacity_utilization:  0.75,
    },
    Vendor::Dunzo => VendorSnapshot {
      status:                VendorStatus::Offline,
      latency_ms:            0,
      delivery_time_minutes: None,
      reliability_score:     0.0,
      coverage_areas:        &[],
      capacity_utilization:  0.0,
    },
    Vendor::Zepto => VendorSnapshot {
      status:                VendorStatus::Available,
      latency_ms:            18,
      delivery_time_minutes: Some(20),
      reliability_score:     0.88,
      coverage_areas:        &[City::Mumbai, City::Bangalore],
      capacity_utilization:  0.82,
    },
    Vendor::SwiggyInstamart => VendorSnapshot {
      status:                VendorStatus::Available,
      latency_ms:            25,
      delivery_time_minutes: Some(30),
      reliability_score:     0.92,
      coverage_areas:        &[City::Bangalore, City::Delhi, City::Mumbai, City::Chennai],
      capacity_utilization:  0.68,
    },
    Vendor::BigBasket => VendorSnapshot {
      status:                VendorStatus::Available,
      latency_ms:            45,
      delivery_time_minutes: Some(120),
      reliability_score:     0.85,
      coverage_areas:        &[
        City::Bangalore,
        City::Delhi,
        City::Mumbai,
        City::Chennai,
        City::Kolkata,
      ],
      capacity_utilization:  0.55,
    },
  }
}

/// Status of the named vendor, narrowed to `location` if one is given.
///
/// Unrecognised vendors get [`UNKNOWN_VENDOR`], whatever the location.
pub fn vendor_status(vendor: &str, location: Option<&str>) -> VendorSnapshot {
  Vendor::resolve(vendor)
    .map_or(UNKNOWN_VENDOR, vendor_profile)
    .at_location(location)
}

/// The most reliable vendor able to deliver to `location`, if any.
pub fn best_vendor(location: &str) -> Option<(Vendor, VendorSnapshot)> {
  Vendor::ALL
    .into_iter()
    .map(|v| (v, vendor_profile(v).at_location(Some(location))))
    .filter(|(_, s)| s.status == VendorStatus::Available)
    .max_by(|(_, a), (_, b)| a.reliability_score.total_cmp(&b.reliability_score))
}
