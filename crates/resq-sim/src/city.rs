//! The fixed set of cities the simulator knows about.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

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
pub enum City {
  Bangalore,
  Delhi,
  Mumbai,
  Chennai,
  Kolkata,
}

impl City {
  pub const ALL: [City; 5] = [
    City::Bangalore,
    City::Delhi,
    City::Mumbai,
    City::Chennai,
    City::Kolkata,
  ];

  /// Exact, case-sensitive match on the city name.
  pub fn resolve(name: &str) -> Option<Self> { Self::from_str(name).ok() }

  /// `(latitude, longitude)` of the city centre.
  pub const fn coordinates(self) -> (f64, f64) {
    match self {
      City::Bangalore => (12.9716, 77.5946),
      City::Delhi => (28.7041, 77.1025),
      City::Mumbai => (19.0760, 72.8777),
      City::Chennai => (13.0827, 80.2707),
      City::Kolkata => (22.5726, 88.3639),
    }
  }

  pub const fn state(self) -> &'static str {
    match self {
      City::Bangalore => "Karnataka",
      City::Delhi => "Delhi",
      City::Mumbai => "Maharashtra",
      City::Chennai => "Tamil Nadu",
      City::Kolkata => "West Bengal",
    }
  }

  pub const fn country(self) -> &'static str { "India" }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn all_matches_iteration_order() {
    assert_eq!(City::iter().collect::<Vec<_>>(), City::ALL);
  }

  #[test]
  fn resolve_is_exact() {
    assert_eq!(City::resolve("Mumbai"), Some(City::Mumbai));
    assert_eq!(City::resolve("mumbai"), None);
    assert_eq!(City::resolve(""), None);
  }
}
