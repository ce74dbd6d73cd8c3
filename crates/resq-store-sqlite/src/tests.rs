//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{Duration, Utc};
use proptest::prelude::*;
use resq_core::{
  chaos::ChaosScenario,
  classify::{ClassifiedRecord, ClassifyPolicy},
  record::{InventoryRecord, Location, SectorType},
  reorder::{PurchaseOrder, ReorderProposal},
  stock::StockAction,
  store::InventoryStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn record(id: &str, org: &str, sector: SectorType) -> InventoryRecord {
  InventoryRecord {
    id:                     id.into(),
    organization_id:        org.into(),
    sector_type:            sector,
    item_type:              "OXYGEN".into(),
    current_stock:          100.0,
    daily_consumption_rate: 10.0,
    reorder_point:          30.0,
    critical_threshold:     3.0,
    location:               Location::new("Bangalore", "Karnataka", "India")
      .with_coordinates(12.9716, 77.5946),
    last_updated:           Utc::now(),
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get() {
  let s = store().await;
  let r = record("HOSP_001", "ORG_A", SectorType::Hospital);

  assert!(s.insert(r.clone()).await.unwrap());

  let fetched = s.get("HOSP_001").await.unwrap().unwrap();
  assert_eq!(fetched.id, r.id);
  assert_eq!(fetched.organization_id, r.organization_id);
  assert_eq!(fetched.sector_type, SectorType::Hospital);
  assert_eq!(fetched.current_stock, 100.0);
  assert_eq!(fetched.location, r.location);
  assert_eq!(
    fetched.last_updated.timestamp_micros(),
    r.last_updated.timestamp_micros()
  );
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_insert_is_rejected_and_first_record_kept() {
  let s = store().await;
  let first = record("HOSP_001", "ORG_A", SectorType::Hospital);
  let mut second = record("HOSP_001", "ORG_B", SectorType::Ngo);
  second.current_stock = 1.0;

  assert!(s.insert(first).await.unwrap());
  assert!(!s.insert(second).await.unwrap());

  let stored = s.get("HOSP_001").await.unwrap().unwrap();
  assert_eq!(stored.organization_id, "ORG_A");
  assert_eq!(stored.sector_type, SectorType::Hospital);
  assert_eq!(stored.current_stock, 100.0);
  assert_eq!(s.query_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn query_all_keeps_insertion_order() {
  let s = store().await;
  for id in ["c", "a", "b"] {
    s.insert(record(id, "ORG_A", SectorType::Pds)).await.unwrap();
  }
  let ids: Vec<_> = s
    .query_all()
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.id)
    .collect();
  assert_eq!(ids, ["c", "a", "b"]);
}

#[tokio::test]
async fn query_by_organization_isolates_tenants() {
  let s = store().await;
  s.insert(record("a1", "ORG_A", SectorType::Hospital)).await.unwrap();
  s.insert(record("b1", "ORG_B", SectorType::Hospital)).await.unwrap();
  s.insert(record("a2", "ORG_A", SectorType::Ngo)).await.unwrap();

  let a = s.query_by_organization("ORG_A").await.unwrap();
  assert_eq!(a.len(), 2);
  assert!(a.iter().all(|r| r.organization_id == "ORG_A"));

  assert!(s.query_by_organization("ORG_C").await.unwrap().is_empty());
}

#[tokio::test]
async fn query_by_sector_filters() {
  let s = store().await;
  s.insert(record("h", "ORG_A", SectorType::Hospital)).await.unwrap();
  s.insert(record("p", "ORG_B", SectorType::Pds)).await.unwrap();
  s.insert(record("n", "ORG_C", SectorType::Ngo)).await.unwrap();

  let pds = s.query_by_sector(SectorType::Pds).await.unwrap();
  assert_eq!(pds.len(), 1);
  assert_eq!(pds[0].id, "p");
}

#[tokio::test]
async fn clear_removes_everything() {
  let s = store().await;
  s.insert(record("h", "ORG_A", SectorType::Hospital)).await.unwrap();
  s.update_stock("h".into(), 5.0, StockAction::ManualUpdate)
    .await
    .unwrap();

  s.clear().await.unwrap();

  assert!(s.query_all().await.unwrap().is_empty());
  assert!(s.stock_history("h").await.unwrap().is_empty());
  // The id is free again.
  assert!(s.insert(record("h", "ORG_A", SectorType::Hospital)).await.unwrap());
}

// ─── Stock levels ────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_stock_audits_the_change() {
  let s = store().await;
  let r = record("h", "ORG_A", SectorType::Hospital);
  let before = r.last_updated;
  s.insert(r).await.unwrap();

  let change = s
    .update_stock(
      "h".into(),
      0.0,
      StockAction::Chaos {
        scenario: ChaosScenario::Stockout,
      },
    )
    .await
    .unwrap()
    .expect("record exists");

  assert_eq!(change.old_stock, 100.0);
  assert_eq!(change.new_stock, 0.0);
  assert!(change.action.is_chaos());

  let stored = s.get("h").await.unwrap().unwrap();
  assert_eq!(stored.current_stock, 0.0);
  assert!(stored.last_updated >= before);

  let history = s.stock_history("h").await.unwrap();
  assert_eq!(history, vec![change]);
}

#[tokio::test]
async fn update_stock_on_missing_record_is_none() {
  let s = store().await;
  let change = s
    .update_stock("ghost".into(), 1.0, StockAction::ManualUpdate)
    .await
    .unwrap();
  assert!(change.is_none());
  assert!(s.stock_history("ghost").await.unwrap().is_empty());
}

#[tokio::test]
async fn history_is_oldest_first() {
  let s = store().await;
  s.insert(record("h", "ORG_A", SectorType::Hospital)).await.unwrap();
  for stock in [80.0, 60.0, 40.0] {
    s.update_stock("h".into(), stock, StockAction::ManualUpdate)
      .await
      .unwrap();
  }
  let history = s.stock_history("h").await.unwrap();
  let steps: Vec<_> = history.iter().map(|c| (c.old_stock, c.new_stock)).collect();
  assert_eq!(steps, [(100.0, 80.0), (80.0, 60.0), (60.0, 40.0)]);
}

#[tokio::test]
async fn negative_stock_is_refused_by_the_schema() {
  let s = store().await;
  s.insert(record("h", "ORG_A", SectorType::Hospital)).await.unwrap();
  let result = s
    .update_stock("h".into(), -1.0, StockAction::ManualUpdate)
    .await;
  assert!(result.is_err());
  assert_eq!(s.get("h").await.unwrap().unwrap().current_stock, 100.0);
  assert!(s.stock_history("h").await.unwrap().is_empty());
}

// ─── Purchase orders ─────────────────────────────────────────────────────────

fn order_for(r: InventoryRecord, supplier: Option<&str>) -> PurchaseOrder {
  let proposal =
    ReorderProposal::for_record(ClassifiedRecord::new(r, &ClassifyPolicy::default()))
      .expect("record needs reorder");
  PurchaseOrder::approve(
    proposal,
    supplier.map(str::to_owned),
    Some(Duration::minutes(27)),
    Utc::now(),
  )
}

#[tokio::test]
async fn purchase_orders_round_trip_newest_first() {
  let s = store().await;
  let mut low = record("h", "ORG_A", SectorType::Hospital);
  low.current_stock = 10.0;
  let mut other = record("p", "ORG_B", SectorType::Pds);
  other.current_stock = 0.0;
  s.insert(low.clone()).await.unwrap();
  s.insert(other.clone()).await.unwrap();

  let first = order_for(low.clone(), Some("Blinkit"));
  let second = order_for(low, None);
  let unrelated = order_for(other, Some("BigBasket"));
  s.record_purchase_order(first.clone()).await.unwrap();
  s.record_purchase_order(second.clone()).await.unwrap();
  s.record_purchase_order(unrelated.clone()).await.unwrap();

  let for_h = s.list_purchase_orders(Some("h")).await.unwrap();
  assert_eq!(for_h.len(), 2);
  assert_eq!(for_h[0].order_id, second.order_id);
  assert_eq!(for_h[1].order_id, first.order_id);
  assert_eq!(for_h[1].supplier.as_deref(), Some("Blinkit"));
  assert_eq!(for_h[1].urgency, first.urgency);
  assert_eq!(for_h[1].quantity, first.quantity);

  let all = s.list_purchase_orders(None).await.unwrap();
  assert_eq!(all.len(), 3);
  assert_eq!(all[0].order_id, unrelated.order_id);
}

// ─── Properties ──────────────────────────────────────────────────────────────

fn arb_sector() -> impl Strategy<Value = SectorType> {
  prop_oneof![
    Just(SectorType::Hospital),
    Just(SectorType::Pds),
    Just(SectorType::Ngo),
  ]
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(32))]

  #[test]
  fn organizations_never_see_each_other(
    owners in prop::collection::vec((0usize..3, arb_sector()), 1..12),
  ) {
    let orgs = ["ORG_A", "ORG_B", "ORG_C"];
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
      let s = store().await;
      for (i, (org, sector)) in owners.iter().enumerate() {
        let id = format!("item_{i}");
        assert!(s.insert(record(&id, orgs[*org], *sector)).await.unwrap());
      }

      let mut seen = 0;
      for (idx, org) in orgs.iter().enumerate() {
        let rows = s.query_by_organization(org).await.unwrap();
        assert!(rows.iter().all(|r| r.organization_id == *org));
        assert_eq!(rows.len(), owners.iter().filter(|(o, _)| *o == idx).count());
        seen += rows.len();
      }
      assert_eq!(seen, s.query_all().await.unwrap().len());
    });
  }
}
