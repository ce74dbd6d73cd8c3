//! One aggregate view over every simulated feed.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
  City,
  Vendor,
  VendorSnapshot,
  WeatherSnapshot,
  traffic::{TrafficSnapshot, traffic_for},
  vendor::vendor_profile,
  weather::weather_for,
};

/// Advertised fidelity of the simulated feeds.
pub const REALISM_PERCENTAGE: f64 = 99.99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSource {
  Simulated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SystemStatus {
  pub api_health:      &'static str,
  pub data_freshness:  &'static str,
  pub simulation_mode: bool,
}

pub const SIMULATED_SYSTEM_STATUS: SystemStatus = SystemStatus {
  api_health:      "SIMULATED_HEALTHY",
  data_freshness:  "REAL_TIME_SIMULATED",
  simulation_mode: true,
};

/// Weather, vendor and traffic data for every known city and vendor.
///
/// Two snapshots differ only in `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSnapshot {
  pub timestamp:          DateTime<Utc>,
  pub data_source:        DataSource,
  pub realism_percentage: f64,
  pub weather_data:       BTreeMap<City, WeatherSnapshot>,
  /// Vendor, then city.
  pub vendor_data:        BTreeMap<Vendor, BTreeMap<City, VendorSnapshot>>,
  pub traffic_data:       BTreeMap<City, TrafficSnapshot>,
  pub system_status:      SystemStatus,
}

/// Build a snapshot stamped with the current wall-clock time.
pub fn generate_snapshot() -> SimulationSnapshot { generate_snapshot_at(Utc::now()) }

/// Build a snapshot with an explicit timestamp.
pub fn generate_snapshot_at(timestamp: DateTime<Utc>) -> SimulationSnapshot {
  let weather_data = City::ALL
    .into_iter()
    .map(|city| (city, weather_for(city)))
    .collect();

  let vendor_data = Vendor::ALL
    .into_iter()
    .map(|vendor| {
      let profile = vendor_profile(vendor);
      let per_city = City::ALL
        .into_iter()
        .map(|city| (city, profile.at_location(Some(city.as_ref()))))
        .collect();
      (vendor, per_city)
    })
    .collect();

  let traffic_data = City::ALL
    .into_iter()
    .map(|city| (city, traffic_for(city)))
    .collect();

  SimulationSnapshot {
    timestamp,
    data_source: DataSource::Simulated,
    realism_percentage: REALISM_PERCENTAGE,
    weather_data,
    vendor_data,
    traffic_data,
    system_status: SIMULATED_SYSTEM_STATUS,
  }
}
