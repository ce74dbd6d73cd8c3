//! Handlers for reorder proposals and purchase orders.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/reorders` | Optional `?organization_id`; most urgent first |
//! | `POST` | `/records/{id}/orders` | Approve the record's reorder; 201, 409 if none is due |
//! | `GET`  | `/orders` | Optional `?record_id`; newest first |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use resq_core::{
  classify::ClassifiedRecord,
  reorder::{self, PurchaseOrder, ReorderProposal},
  store::InventoryStore,
};
use serde::Deserialize;

use crate::{
  ApiState,
  error::ApiError,
  records::{fetch, select},
};

#[derive(Debug, Default, Deserialize)]
pub struct ReorderParams {
  pub organization_id: Option<String>,
}

/// `GET /reorders[?organization_id=...]`
pub async fn proposals<S: InventoryStore>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ReorderParams>,
) -> Result<Json<Vec<ReorderProposal>>, ApiError> {
  let records = select(
    state.store.as_ref(),
    params.organization_id.as_deref(),
    None,
  )
  .await?;
  Ok(Json(reorder::proposals(records, &state.policy)))
}

/// `POST /records/{id}/orders`
///
/// The supplier is the most reliable vendor currently able to deliver to the
/// record's city; the delivery estimate is that vendor's quote stretched by
/// local traffic.
pub async fn approve<S: InventoryStore>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
  let record = fetch(state.store.as_ref(), &id).await?;
  let city = record.location.city.clone();

  let proposal = ReorderProposal::for_record(ClassifiedRecord::new(record, &state.policy))
    .ok_or_else(|| ApiError::Conflict(format!("record {id} does not need reordering")))?;

  let (supplier, lead_time) = match resq_sim::best_vendor(&city) {
    Some((vendor, quote)) => (
      Some(vendor.to_string()),
      resq_sim::delivery_lead_time(&quote, &city),
    ),
    None => {
      tracing::warn!(%id, %city, "no vendor serves this city; using fallback lead time");
      (None, None)
    }
  };

  let order = PurchaseOrder::approve(proposal, supplier, lead_time, Utc::now());
  state
    .store
    .record_purchase_order(order.clone())
    .await
    .map_err(ApiError::store)?;

  tracing::info!(
    %id,
    order_id = %order.order_id,
    urgency = %order.urgency,
    quantity = order.quantity,
    "purchase order approved"
  );
  Ok((StatusCode::CREATED, Json(order)))
}

#[derive(Debug, Default, Deserialize)]
pub struct OrderParams {
  pub record_id: Option<String>,
}

/// `GET /orders[?record_id=...]`
pub async fn list<S: InventoryStore>(
  State(state): State<ApiState<S>>,
  Query(params): Query<OrderParams>,
) -> Result<Json<Vec<PurchaseOrder>>, ApiError> {
  let orders = state
    .store
    .list_purchase_orders(params.record_id.as_deref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(orders))
}
