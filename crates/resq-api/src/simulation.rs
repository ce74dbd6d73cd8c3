//! Handlers exposing the external-conditions simulator.
//!
//! Unknown cities and vendors resolve to the simulator's defaults, except
//! traffic, which has no default and answers 404.

use axum::{
  Json,
  extract::{Path, Query},
};
use resq_sim::{
  SimulationSnapshot, TrafficSnapshot, VendorSnapshot, WeatherSnapshot,
};
use serde::Deserialize;

use crate::error::ApiError;

/// `GET /simulation/weather/{city}`
pub async fn weather(Path(city): Path<String>) -> Json<WeatherSnapshot> {
  Json(resq_sim::weather(&city))
}

#[derive(Debug, Default, Deserialize)]
pub struct VendorParams {
  pub location: Option<String>,
}

/// `GET /simulation/vendors/{vendor}[?location=...]`
pub async fn vendor(
  Path(vendor): Path<String>,
  Query(params): Query<VendorParams>,
) -> Json<VendorSnapshot> {
  Json(resq_sim::vendor_status(&vendor, params.location.as_deref()))
}

/// `GET /simulation/traffic/{city}`
pub async fn traffic(Path(city): Path<String>) -> Result<Json<TrafficSnapshot>, ApiError> {
  resq_sim::traffic(&city)
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("no traffic data for {city}")))
}

/// `GET /simulation/snapshot`
pub async fn snapshot() -> Json<SimulationSnapshot> { Json(resq_sim::generate_snapshot()) }
