//! Handlers for chaos drills.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/records/{id}/chaos` | Body: `{"scenario":"stockout"\|"shortage"\|"emergency"}` |
//! | `POST` | `/chaos/global` | Body: `{"organization_id":..., "limit":3}`, both optional |

use axum::{
  Json,
  extract::{Path, State},
};
use resq_core::{
  chaos::{ChaosScenario, DEFAULT_GLOBAL_CRISIS_SIZE, global_crisis_targets},
  stock::{StockAction, StockChange},
  store::InventoryStore,
};
use serde::Deserialize;

use crate::{
  ApiState,
  error::ApiError,
  records::{fetch, select},
};

#[derive(Debug, Deserialize)]
pub struct ScenarioBody {
  pub scenario: ChaosScenario,
}

/// `POST /records/{id}/chaos`
pub async fn run_one<S: InventoryStore>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
  Json(body): Json<ScenarioBody>,
) -> Result<Json<StockChange>, ApiError> {
  let record = fetch(state.store.as_ref(), &id).await?;
  let target = body.scenario.target_stock(&record);

  let change = state
    .store
    .update_stock(
      id.clone(),
      target,
      StockAction::Chaos {
        scenario: body.scenario,
      },
    )
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("record {id} not found")))?;
  Ok(Json(change))
}

#[derive(Debug, Default, Deserialize)]
pub struct GlobalCrisisBody {
  #[serde(default)]
  pub organization_id: Option<String>,
  #[serde(default)]
  pub limit:           Option<usize>,
}

/// `POST /chaos/global`: stock out the most urgent records at once.
pub async fn run_global<S: InventoryStore>(
  State(state): State<ApiState<S>>,
  Json(body): Json<GlobalCrisisBody>,
) -> Result<Json<Vec<StockChange>>, ApiError> {
  let records = select(state.store.as_ref(), body.organization_id.as_deref(), None).await?;
  let limit = body.limit.unwrap_or(DEFAULT_GLOBAL_CRISIS_SIZE);
  let targets = global_crisis_targets(records, &state.policy, limit);

  let mut changes = Vec::with_capacity(targets.len());
  for record in targets {
    let scenario = ChaosScenario::Stockout;
    let target = scenario.target_stock(&record);
    let change = state
      .store
      .update_stock(record.id, target, StockAction::Chaos { scenario })
      .await
      .map_err(ApiError::store)?;
    changes.extend(change);
  }

  tracing::warn!(count = changes.len(), "global crisis simulated");
  Ok(Json(changes))
}
