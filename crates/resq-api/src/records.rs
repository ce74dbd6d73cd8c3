//! Handlers for `/records`, `/summary` and `/sectors`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/records` | Optional `?organization_id`, `?sector` |
//! | `POST` | `/records` | Body: [`NewRecordBody`]; 201, 409 on duplicate id |
//! | `GET`  | `/records/{id}` | 404 if not found |
//! | `PUT`  | `/records/{id}/stock` | Body: `{"current_stock":12.5}` |
//! | `GET`  | `/records/{id}/history` | Audited stock changes, oldest first |
//! | `GET`  | `/summary` | Optional `?organization_id` |
//! | `GET`  | `/sectors` | Static sector configuration |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use resq_core::{
  classify::{ClassifiedRecord, StatusSummary, classify},
  record::{InventoryRecord, Location, SectorType},
  sector::{SECTOR_CONFIGS, SectorConfig},
  stock::{StockAction, StockChange},
  store::InventoryStore,
};
use resq_sim::City;
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  /// Restrict to one tenant. Records of other tenants are never returned.
  pub organization_id: Option<String>,
  pub sector:          Option<SectorType>,
}

/// Records for an optional tenant and sector, tenant filter first.
pub(crate) async fn select<S: InventoryStore>(
  store: &S,
  organization_id: Option<&str>,
  sector: Option<SectorType>,
) -> Result<Vec<InventoryRecord>, ApiError> {
  let mut records = match (organization_id, sector) {
    (Some(org), _) => store.query_by_organization(org).await,
    (None, Some(sector)) => store.query_by_sector(sector).await,
    (None, None) => store.query_all().await,
  }
  .map_err(ApiError::store)?;

  if let (Some(_), Some(sector)) = (organization_id, sector) {
    records.retain(|r| r.sector_type == sector);
  }
  Ok(records)
}

/// `GET /records[?organization_id=...][&sector=HOSPITAL|PDS|NGO]`
pub async fn list<S: InventoryStore>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<ClassifiedRecord>>, ApiError> {
  let records = select(
    state.store.as_ref(),
    params.organization_id.as_deref(),
    params.sector,
  )
  .await?;

  Ok(Json(
    records
      .into_iter()
      .map(|r| ClassifiedRecord::new(r, &state.policy))
      .collect(),
  ))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /records`.
#[derive(Debug, Deserialize)]
pub struct NewRecordBody {
  pub id:                     String,
  pub organization_id:        String,
  pub sector_type:            SectorType,
  pub item_type:              String,
  pub current_stock:          f64,
  pub daily_consumption_rate: f64,
  pub reorder_point:          f64,
  pub critical_threshold:     f64,
  pub location:               Location,
}

impl From<NewRecordBody> for InventoryRecord {
  fn from(b: NewRecordBody) -> Self {
    let mut location = b.location;
    if location.latitude.is_none()
      && location.longitude.is_none()
      && let Some(city) = City::resolve(&location.city)
    {
      let (lat, lon) = city.coordinates();
      location = location.with_coordinates(lat, lon);
    }

    InventoryRecord {
      id: b.id,
      organization_id: b.organization_id,
      sector_type: b.sector_type,
      item_type: b.item_type,
      current_stock: b.current_stock,
      daily_consumption_rate: b.daily_consumption_rate,
      reorder_point: b.reorder_point,
      critical_threshold: b.critical_threshold,
      location,
      last_updated: Utc::now(),
    }
  }
}

/// `POST /records`: returns 201 and the classified record.
pub async fn create<S: InventoryStore>(
  State(state): State<ApiState<S>>,
  Json(body): Json<NewRecordBody>,
) -> Result<impl IntoResponse, ApiError> {
  let record = InventoryRecord::from(body);
  record.validate()?;

  let inserted = state
    .store
    .insert(record.clone())
    .await
    .map_err(ApiError::store)?;
  if !inserted {
    return Err(ApiError::Conflict(format!(
      "record {} already exists",
      record.id
    )));
  }

  tracing::info!(
    id = %record.id,
    organization_id = %record.organization_id,
    sector = %record.sector_type,
    "inventory record created"
  );
  Ok((
    StatusCode::CREATED,
    Json(ClassifiedRecord::new(record, &state.policy)),
  ))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

pub(crate) async fn fetch<S: InventoryStore>(
  store: &S,
  id: &str,
) -> Result<InventoryRecord, ApiError> {
  store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("record {id} not found")))
}

/// `GET /records/{id}`
pub async fn get_one<S: InventoryStore>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<ClassifiedRecord>, ApiError> {
  let record = fetch(state.store.as_ref(), &id).await?;
  Ok(Json(ClassifiedRecord::new(record, &state.policy)))
}

// ─── Stock ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StockBody {
  pub current_stock: f64,
}

/// `PUT /records/{id}/stock`
pub async fn update_stock<S: InventoryStore>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
  Json(body): Json<StockBody>,
) -> Result<Json<StockChange>, ApiError> {
  if !body.current_stock.is_finite() || body.current_stock < 0.0 {
    return Err(ApiError::BadRequest(
      "current_stock must be a finite, non-negative number".into(),
    ));
  }

  let change = state
    .store
    .update_stock(id.clone(), body.current_stock, StockAction::ManualUpdate)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("record {id} not found")))?;
  Ok(Json(change))
}

/// `GET /records/{id}/history`
pub async fn history<S: InventoryStore>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Vec<StockChange>>, ApiError> {
  fetch(state.store.as_ref(), &id).await?;
  let changes = state
    .store
    .stock_history(&id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(changes))
}

// ─── Summary ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SummaryParams {
  pub organization_id: Option<String>,
}

/// `GET /summary[?organization_id=...]`
pub async fn summary<S: InventoryStore>(
  State(state): State<ApiState<S>>,
  Query(params): Query<SummaryParams>,
) -> Result<Json<StatusSummary>, ApiError> {
  let records = select(
    state.store.as_ref(),
    params.organization_id.as_deref(),
    None,
  )
  .await?;
  let classifications: Vec<_> = records
    .iter()
    .map(|r| classify(r, &state.policy))
    .collect();
  Ok(Json(StatusSummary::from_classifications(&classifications)))
}

/// `GET /sectors`
pub async fn sectors() -> Json<[SectorConfig; 3]> { Json(SECTOR_CONFIGS) }
