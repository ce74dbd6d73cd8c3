//! Simulated road congestion, and delivery lead times derived from it.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::{City, VendorSnapshot};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Congestion {
  Moderate,
  High,
  #[serde(rename = "Very High")]
  #[strum(serialize = "Very High")]
  VeryHigh,
  Extreme,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficSnapshot {
  pub congestion_level: Congestion,
  /// Factor applied to nominal delivery times; always in `[1, 3]`.
  pub delay_multiplier: f64,
  pub avg_speed_kmh:    u32,
}

pub const fn traffic_for(city: City) -> TrafficSnapshot {
  let (congestion_level, delay_multiplier, avg_speed_kmh) = match city {
    City::Bangalore => (Congestion::High, 1.8, 15),
    City::Delhi => (Congestion::VeryHigh, 2.1, 12),
    City::Mumbai => (Congestion::Extreme, 2.5, 10),
    City::Chennai => (Congestion::Moderate, 1.4, 20),
    City::Kolkata => (Congestion::High, 1.6, 18),
  };
  TrafficSnapshot {
    congestion_level,
    delay_multiplier,
    avg_speed_kmh,
  }
}

/// Traffic for a known city. There is no default entry.
pub fn traffic(city: &str) -> Option<TrafficSnapshot> {
  City::resolve(city).map(traffic_for)
}

/// The vendor's nominal delivery time stretched by the city's traffic delay.
///
/// `None` when the vendor quotes no delivery time. Cities without traffic data
/// use the nominal time unchanged.
pub fn delivery_lead_time(vendor: &VendorSnapshot, city: &str) -> Option<Duration> {
  let minutes = vendor.delivery_time_minutes?;
  let delay = traffic(city).map_or(1.0, |t| t.delay_multiplier);
  let seconds = (f64::from(minutes) * 60.0 * delay).round() as i64;
  Some(Duration::seconds(seconds))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::vendor_status;

  #[test]
  fn table_respects_ranges() {
    for city in City::ALL {
      let t = traffic_for(city);
      assert!((1.0..=3.0).contains(&t.delay_multiplier), "{city}");
      assert!(t.avg_speed_kmh > 0, "{city}");
    }
  }

  #[test]
  fn unknown_city_has_no_traffic() {
    assert!(traffic("Atlantis").is_none());
    assert_eq!(
      traffic("Delhi").map(|t| t.congestion_level),
      Some(Congestion::VeryHigh)
    );
  }

  #[test]
  fn lead_time_applies_delay() {
    let blinkit = vendor_status("Blinkit", Some("Bangalore"));
    assert_eq!(
      delivery_lead_time(&blinkit, "Bangalore"),
      Some(Duration::minutes(27))
    );
  }

  #[test]
  fn no_delivery_time_no_lead_time() {
    let zepto = vendor_status("Zepto", Some("Delhi"));
    assert_eq!(delivery_lead_time(&zepto, "Delhi"), None);
  }

  #[test]
  fn congestion_wire_form() {
    assert_eq!(
      serde_json::to_string(&Congestion::VeryHigh).unwrap(),
      "\"Very High\""
    );
  }
}
