//! Demo records for a fresh deployment: one per sector.

use chrono::{DateTime, Utc};
use resq_core::{
  record::{InventoryRecord, Location, SectorType},
  store::InventoryStore,
};
use resq_sim::City;

fn demo_record(
  id: &str,
  organization_id: &str,
  sector_type: SectorType,
  item_type: &str,
  (current_stock, daily_consumption_rate, reorder_point, critical_threshold): (
    f64,
    f64,
    f64,
    f64,
  ),
  city: City,
  now: DateTime<Utc>,
) -> InventoryRecord {
  let (lat, lon) = city.coordinates();
  InventoryRecord {
    id: id.to_owned(),
    organization_id: organization_id.to_owned(),
    sector_type,
    item_type: item_type.to_owned(),
    current_stock,
    daily_consumption_rate,
    reorder_point,
    critical_threshold,
    location: Location::new(city.as_ref(), city.state(), city.country())
      .with_coordinates(lat, lon),
    last_updated: now,
  }
}

pub fn demo_records(now: DateTime<Utc>) -> Vec<InventoryRecord> {
  vec![
    demo_record(
      "HOSP_001",
      "ORG_HOSPITAL_001",
      SectorType::Hospital,
      "OXYGEN",
      (100.0, 10.0, 30.0, 3.0),
      City::Bangalore,
      now,
    ),
    demo_record(
      "PDS_001",
      "ORG_PDS_001",
      SectorType::Pds,
      "RICE",
      (500.0, 25.0, 100.0, 7.0),
      City::Delhi,
      now,
    ),
    demo_record(
      "NGO_001",
      "ORG_NGO_001",
      SectorType::Ngo,
      "EMERGENCY_KIT",
      (50.0, 5.0, 15.0, 5.0),
      City::Mumbai,
      now,
    ),
  ]
}

/// Insert [`demo_records`] if the store holds nothing yet. Returns how many
/// records were inserted.
pub async fn seed_if_empty<S: InventoryStore>(store: &S) -> Result<usize, S::Error> {
  if !store.query_all().await?.is_empty() {
    return Ok(0);
  }

  let mut inserted = 0;
  for record in demo_records(Utc::now()) {
    if store.insert(record).await? {
      inserted += 1;
    }
  }
  tracing::info!(inserted, "seeded demo inventory");
  Ok(inserted)
}
