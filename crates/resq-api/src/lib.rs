//! JSON REST API for ResQ.
//!
//! Exposes an axum [`Router`] backed by any
//! [`resq_core::store::InventoryStore`]. Every record leaves the API
//! classified under the router's [`ClassifyPolicy`]; nothing derived is ever
//! written back. Auth, TLS and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", resq_api::api_router(store.clone(), ClassifyPolicy::default()))
//! ```

pub mod chaos;
pub mod error;
pub mod orders;
pub mod records;
pub mod simulation;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use resq_core::{classify::ClassifyPolicy, store::InventoryStore};

pub use error::ApiError;

/// Shared handler state.
pub struct ApiState<S> {
  pub store:  Arc<S>,
  pub policy: ClassifyPolicy,
}

// Derived `Clone` would require `S: Clone`.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      policy: self.policy,
    }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, policy: ClassifyPolicy) -> Router<()>
where
  S: InventoryStore + 'static,
{
  Router::new()
    // Records
    .route("/records", get(records::list::<S>).post(records::create::<S>))
    .route("/records/{id}", get(records::get_one::<S>))
    .route("/records/{id}/stock", put(records::update_stock::<S>))
    .route("/records/{id}/history", get(records::history::<S>))
    .route("/records/{id}/chaos", post(chaos::run_one::<S>))
    .route("/records/{id}/orders", post(orders::approve::<S>))
    // Overview
    .route("/summary", get(records::summary::<S>))
    .route("/sectors", get(records::sectors))
    // Chaos and restocking
    .route("/chaos/global", post(chaos::run_global::<S>))
    .route("/reorders", get(orders::proposals::<S>))
    .route("/orders", get(orders::list::<S>))
    // Simulation
    .route("/simulation/weather/{city}", get(simulation::weather))
    .route("/simulation/vendors/{vendor}", get(simulation::vendor))
    .route("/simulation/traffic/{city}", get(simulation::traffic))
    .route("/simulation/snapshot", get(simulation::snapshot))
    .with_state(ApiState { store, policy })
}
