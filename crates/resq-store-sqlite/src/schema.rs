//! SQL schema for the ResQ SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- One row per stocked item. Rows are never deleted individually; only
-- current_stock and last_updated change after insertion.
CREATE TABLE IF NOT EXISTS inventory (
    inventory_id           TEXT PRIMARY KEY,
    organization_id        TEXT NOT NULL,
    sector_type            TEXT NOT NULL,   -- 'HOSPITAL' | 'PDS' | 'NGO'
    item_type              TEXT NOT NULL,
    current_stock          REAL NOT NULL CHECK (current_stock >= 0),
    daily_consumption_rate REAL NOT NULL CHECK (daily_consumption_rate >= 0),
    reorder_point          REAL NOT NULL,
    critical_threshold     REAL NOT NULL CHECK (critical_threshold >= 0),
    location_city          TEXT NOT NULL,
    location_state         TEXT NOT NULL,
    location_country       TEXT NOT NULL,
    location_latitude      REAL,
    location_longitude     REAL,
    last_updated           TEXT NOT NULL    -- ISO 8601 UTC
);

-- Append-only audit trail of stock mutations.
CREATE TABLE IF NOT EXISTS stock_changes (
    change_id    TEXT PRIMARY KEY,
    inventory_id TEXT NOT NULL REFERENCES inventory(inventory_id),
    action       TEXT NOT NULL,             -- JSON-encoded StockAction
    old_stock    REAL NOT NULL,
    new_stock    REAL NOT NULL,
    recorded_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS purchase_orders (
    order_id           TEXT PRIMARY KEY,
    inventory_id       TEXT NOT NULL REFERENCES inventory(inventory_id),
    quantity           REAL NOT NULL,
    urgency_level      TEXT NOT NULL,       -- 'CRITICAL' | 'HIGH' | 'MEDIUM'
    supplier_name      TEXT,
    reasoning          TEXT NOT NULL,
    auto_generated     INTEGER NOT NULL,
    estimated_delivery TEXT NOT NULL,
    created_at         TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS inventory_org_idx      ON inventory(organization_id);
CREATE INDEX IF NOT EXISTS inventory_sector_idx   ON inventory(sector_type);
CREATE INDEX IF NOT EXISTS stock_changes_item_idx ON stock_changes(inventory_id);
CREATE INDEX IF NOT EXISTS orders_item_idx        ON purchase_orders(inventory_id);

PRAGMA user_version = 1;
";
