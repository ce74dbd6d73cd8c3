//! Simulated weather, keyed by city name alone.

use serde::{Deserialize, Serialize};

use crate::City;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Condition {
  Clear,
  Rain,
  Haze,
  Humid,
  Overcast,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Visibility {
  Excellent,
  Good,
  Fair,
  Low,
}

/// Conditions for one city.
///
/// Every table entry satisfies `risk_multiplier > 0`, `5 <= temperature <= 50`,
/// `humidity <= 100` and `wind_speed <= 50`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
  pub condition:       Condition,
  /// Factor applied to supply risk; 1.0 is neutral.
  pub risk_multiplier: f64,
  /// Degrees Celsius.
  pub temperature:     i32,
  /// Relative humidity, percent.
  pub humidity:        u8,
  pub visibility:      Visibility,
  /// km/h.
  pub wind_speed:      u32,
}

/// Returned for any city without its own entry.
pub const DEFAULT_WEATHER: WeatherSnapshot = WeatherSnapshot {
  condition:       Condition::Clear,
  risk_multiplier: 1.0,
  temperature:     25,
  humidity:        65,
  visibility:      Visibility::Good,
  wind_speed:      10,
};

pub const fn weather_for(city: City) -> WeatherSnapshot {
  match city {
    City::Bangalore => WeatherSnapshot {
      condition:       Condition::Rain,
      risk_multiplier: 1.5,
      temperature:     24,
      humidity:        85,
      visibility:      Visibility::Good,
      wind_speed:      15,
    },
    City::Delhi => WeatherSnapshot {
      condition:       Condition::Haze,
      risk_multiplier: 1.2,
      temperature:     28,
      humidity:        60,
      visibility:      Visibility::Low,
      wind_speed:      8,
    },
    City::Mumbai => WeatherSnapshot {
      condition:       Condition::Clear,
      risk_multiplier: 1.0,
      temperature:     32,
      humidity:        70,
      visibility:      Visibility::Excellent,
      wind_speed:      12,
    },
    City::Chennai => WeatherSnapshot {
      condition:       Condition::Humid,
      risk_multiplier: 1.1,
      temperature:     35,
      humidity:        80,
      visibility:      Visibility::Good,
      wind_speed:      10,
    },
    City::Kolkata => WeatherSnapshot {
      condition:       Condition::Overcast,
      risk_multiplier: 1.3,
      temperature:     30,
      humidity:        75,
      visibility:      Visibility::Fair,
      wind_speed:      6,
    },
  }
}

/// Weather for `city`, or [`DEFAULT_WEATHER`] if the name is not recognised.
pub fn weather(city: &str) -> WeatherSnapshot {
  City::resolve(city).map_or(DEFAULT_WEATHER, weather_for)
}

#[cfg(test)]
mod tests {
  use proptest::prelude::*;

  use super::*;

  #[test]
  fn fixed_points() {
    assert_eq!(weather("Bangalore").condition, Condition::Rain);
    assert_eq!(weather("Delhi").condition, Condition::Haze);
    assert_eq!(weather("Mumbai").condition, Condition::Clear);
    assert_eq!(weather("Chennai").condition, Condition::Humid);
    assert_eq!(weather("Kolkata").condition, Condition::Overcast);
  }

  #[test]
  fn unknown_cities_get_the_default() {
    for name in ["", "Atlantis", "bangalore", "New York"] {
      assert_eq!(weather(name), DEFAULT_WEATHER, "{name:?}");
    }
  }

  #[test]
  fn table_respects_ranges() {
    for city in City::ALL {
      let w = weather_for(city);
      assert!(w.risk_multiplier > 0.0, "{city}");
      assert!((5..=50).contains(&w.temperature), "{city}");
      assert!(w.humidity <= 100, "{city}");
      assert!(w.wind_speed <= 50, "{city}");
    }
  }

  #[test]
  fn json_uses_original_field_names() {
    let json = serde_json::to_value(weather("Delhi")).unwrap();
    assert_eq!(
      json,
      serde_json::json!({
        "condition": "Haze",
        "risk_multiplier": 1.2,
        "temperature": 28,
        "humidity": 60,
        "visibility": "Low",
        "wind_speed": 8,
      })
    );
  }

  proptest! {
    #[test]
    fn any_name_is_deterministic(name in ".*") {
      let first = weather(&name);
      for _ in 0..3 {
        prop_assert_eq!(weather(&name), first);
      }
      prop_assert!(first.risk_multiplier > 0.0);
    }
  }
}
