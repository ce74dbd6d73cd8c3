//! Static per-sector configuration.

use serde::{Deserialize, Serialize};

use crate::record::SectorType;

/// Tuning values for one sector. Loaded once; never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorConfig {
  pub sector_type:            SectorType,
  pub criticality_multiplier: f64,
  pub default_reorder_days:   u32,
  /// Lower is more urgent. Reorder queues sort on this first.
  pub priority_level:         u8,
}

pub const SECTOR_CONFIGS: [SectorConfig; 3] = [
  SectorConfig {
    sector_type:            SectorType::Hospital,
    criticality_multiplier: 2.0,
    default_reorder_days:   3,
    priority_level:         1,
  },
  SectorConfig {
    sector_type:            SectorType::Pds,
    criticality_multiplier: 1.5,
    default_reorder_days:   7,
    priority_level:         2,
  },
  SectorConfig {
    sector_type:            SectorType::Ngo,
    criticality_multiplier: 1.8,
    default_reorder_days:   5,
    priority_level:         1,
  },
];

impl SectorType {
  pub fn config(self) -> &'static SectorConfig {
    match self {
      SectorType::Hospital => &SECTOR_CONFIGS[0],
      SectorType::Pds => &SECTOR_CONFIGS[1],
      SectorType::Ngo => &SECTOR_CONFIGS[2],
    }
  }
}
