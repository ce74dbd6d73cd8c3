//! HTTP server wiring for ResQ: configuration, demo data, and the top-level
//! router.

pub mod seed;

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use resq_core::{classify::ClassifyPolicy, store::InventoryStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `resq.toml` and `RESQ_*`
/// environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  pub store_path:          PathBuf,
  /// Days of cover below which a record is `WARNING`.
  pub warning_window_days: f64,
  /// Insert the demo records when the store starts out empty.
  pub seed_demo_data:      bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                "127.0.0.1".to_string(),
      port:                8000,
      store_path:          PathBuf::from("resq.db"),
      warning_window_days: resq_core::classify::DEFAULT_WARNING_WINDOW_DAYS,
      seed_demo_data:      false,
    }
  }
}

impl ServerConfig {
  pub fn policy(&self) -> ClassifyPolicy {
    ClassifyPolicy {
      warning_window_days: self.warning_window_days,
    }
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API mounted under `/api`, with request tracing.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: InventoryStore + 'static,
{
  Router::new()
    .nest("/api", resq_api::api_router(store, config.policy()))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use resq_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  #[test]
  fn defaults_fill_missing_keys() {
    let cfg: ServerConfig = config::Config::builder()
      .set_override("port", 9000)
      .unwrap()
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();

    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.warning_window_days, 7.0);
    assert!(!cfg.seed_demo_data);
    assert_eq!(cfg.address(), "127.0.0.1:9000");
  }

  #[test]
  fn policy_follows_the_warning_window() {
    let cfg = ServerConfig {
      warning_window_days: 10.0,
      ..ServerConfig::default()
    };
    assert_eq!(cfg.policy().warning_window_days, 10.0);
  }

  #[tokio::test]
  async fn api_is_nested_under_api_prefix() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let app = app(store, &ServerConfig::default());

    let resp = app
      .clone()
      .oneshot(Request::get("/api/sectors").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
      .oneshot(Request::get("/sectors").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
