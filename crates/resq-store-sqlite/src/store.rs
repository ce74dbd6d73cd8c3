//! [`SqliteStore`], the SQLite implementation of [`InventoryStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use resq_core::{
  record::{InventoryRecord, SectorType},
  reorder::PurchaseOrder,
  stock::{StockAction, StockChange},
  store::InventoryStore,
};

use crate::{
  Result,
  encode::{
    RECORD_COLUMNS, RawPurchaseOrder, RawRecord, RawStockChange, encode_action,
    encode_dt, encode_sector, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An inventory store backed by a single SQLite file.
///
/// Clones share one connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `SELECT <record columns> FROM inventory [WHERE <filter> = ?1]` in
  /// insertion order.
  async fn select_records(
    &self,
    filter: Option<(&'static str, String)>,
  ) -> Result<Vec<InventoryRecord>> {
    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let rows = match filter {
          Some((column, value)) => {
            let sql = format!(
              "SELECT {RECORD_COLUMNS} FROM inventory WHERE {column} = ?1 ORDER BY rowid"
            );
            let mut stmt = conn.prepare(&sql)?;
            stmt
              .query_map(rusqlite::params![value], RawRecord::from_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?
          }
          None => {
            let sql = format!("SELECT {RECORD_COLUMNS} FROM inventory ORDER BY rowid");
            let mut stmt = conn.prepare(&sql)?;
            stmt
              .query_map([], RawRecord::from_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?
          }
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }
}

// ─── InventoryStore impl ─────────────────────────────────────────────────────

impl InventoryStore for SqliteStore {
  type Error = crate::Error;

  // ── Records ───────────────────────────────────────────────────────────────

  async fn insert(&self, record: InventoryRecord) -> Result<bool> {
    let id = record.id.clone();
    let sector = encode_sector(record.sector_type).to_owned();
    let last_updated = encode_dt(record.last_updated);

    let inserted = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "INSERT INTO inventory (
             inventory_id, organization_id, sector_type, item_type,
             current_stock, daily_consumption_rate, reorder_point,
             critical_threshold, location_city, location_state,
             location_country, location_latitude, location_longitude,
             last_updated
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
           ON CONFLICT (inventory_id) DO NOTHING",
          rusqlite::params![
            record.id,
            record.organization_id,
            sector,
            record.item_type,
            record.current_stock,
            record.daily_consumption_rate,
            record.reorder_point,
            record.critical_threshold,
            record.location.city,
            record.location.state,
            record.location.country,
            record.location.latitude,
            record.location.longitude,
            last_updated,
          ],
        )?;
        Ok(changed == 1)
      })
      .await?;

    if !inserted {
      tracing::debug!(%id, "rejected duplicate inventory id");
    }
    Ok(inserted)
  }

  async fn get(&self, id: &str) -> Result<Option<InventoryRecord>> {
    let id = id.to_owned();

    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM inventory WHERE inventory_id = ?1");
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id], RawRecord::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawRecord::into_record).transpose()
  }

  async fn query_all(&self) -> Result<Vec<InventoryRecord>> {
    self.select_records(None).await
  }

  async fn query_by_organization(&self, organization_id: &str) -> Result<Vec<InventoryRecord>> {
    self
      .select_records(Some(("organization_id", organization_id.to_owned())))
      .await
  }

  async fn query_by_sector(&self, sector: SectorType) -> Result<Vec<InventoryRecord>> {
    self
      .select_records(Some(("sector_type", encode_sector(sector).to_owned())))
      .await
  }

  async fn clear(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(
          "DELETE FROM stock_changes;
           DELETE FROM purchase_orders;
           DELETE FROM inventory;",
        )?;
        Ok(())
      })
      .await?;
    tracing::info!("inventory store cleared");
    Ok(())
  }

  // ── Stock levels ──────────────────────────────────────────────────────────

  async fn update_stock(
    &self,
    id: String,
    new_stock: f64,
    action: StockAction,
  ) -> Result<Option<StockChange>> {
    let change_id = Uuid::new_v4();
    let recorded_at = Utc::now();

    let change_id_str = encode_uuid(change_id);
    let at_str = encode_dt(recorded_at);
    let action_str = encode_action(&action)?;
    let id_param = id.clone();

    let old_stock: Option<f64> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let old: Option<f64> = tx
          .query_row(
            "SELECT current_stock FROM inventory WHERE inventory_id = ?1",
            rusqlite::params![id_param],
            |r| r.get(0),
          )
          .optional()?;

        let Some(old) = old else {
          return Ok(None);
        };

        tx.execute(
          "UPDATE inventory SET current_stock = ?1, last_updated = ?2
           WHERE inventory_id = ?3",
          rusqlite::params![new_stock, at_str, id_param],
        )?;
        tx.execute(
          "INSERT INTO stock_changes (
             change_id, inventory_id, action, old_stock, new_stock, recorded_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![change_id_str, id_param, action_str, old, new_stock, at_str],
        )?;
        tx.commit()?;

        Ok(Some(old))
      })
      .await?;

    let Some(old_stock) = old_stock else {
      return Ok(None);
    };

    if action.is_chaos() {
      tracing::warn!(%id, old_stock, new_stock, ?action, "chaos stock reset applied");
    } else {
      tracing::debug!(%id, old_stock, new_stock, "stock level updated");
    }

    Ok(Some(StockChange {
      change_id,
      record_id: id,
      action,
      old_stock,
      new_stock,
      recorded_at,
    }))
  }

  async fn stock_history(&self, id: &str) -> Result<Vec<StockChange>> {
    let id = id.to_owned();

    let raws: Vec<RawStockChange> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT change_id, inventory_id, action, old_stock, new_stock, recorded_at
           FROM stock_changes
           WHERE inventory_id = ?1
           ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id], RawStockChange::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStockChange::into_change).collect()
  }

  // ── Purchase orders ───────────────────────────────────────────────────────

  async fn record_purchase_order(&self, order: PurchaseOrder) -> Result<()> {
    let order_id_str = encode_uuid(order.order_id);
    let urgency = order.urgency.to_string();
    let delivery_str = encode_dt(order.estimated_delivery);
    let created_str = encode_dt(order.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO purchase_orders (
             order_id, inventory_id, quantity, urgency_level, supplier_name,
             reasoning, auto_generated, estimated_delivery, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            order_id_str,
            order.record_id,
            order.quantity,
            urgency,
            order.supplier,
            order.reasoning,
            order.auto_generated,
            delivery_str,
            created_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list_purchase_orders(&self, record_id: Option<&str>) -> Result<Vec<PurchaseOrder>> {
    let record_id = record_id.map(str::to_owned);

    let raws: Vec<RawPurchaseOrder> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT order_id, inventory_id, quantity, urgency_level, supplier_name,
                  reasoning, auto_generated, estimated_delivery, created_at
           FROM purchase_orders
           WHERE ?1 IS NULL OR inventory_id = ?1
           ORDER BY rowid DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![record_id], RawPurchaseOrder::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPurchaseOrder::into_order).collect()
  }
}
