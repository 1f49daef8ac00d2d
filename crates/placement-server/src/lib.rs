//! HTTP server wiring for the placement tracker.
//!
//! [`ServerConfig`] is deserialised from `config.toml` and `PLACEMENT_*`
//! environment variables; [`app`] wraps the API router in the transport
//! layers the config asks for.

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use placement_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration. Every field has a default, so an absent
/// config file still yields a working server.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  pub database_path:   PathBuf,
  /// Allow any origin. Browser front-ends served from elsewhere need this.
  pub cors_permissive: bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:            "127.0.0.1".to_string(),
      port:            8000,
      database_path:   PathBuf::from("instance/database.db"),
      cors_permissive: true,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application: API routes plus request tracing and, if
/// enabled, permissive CORS.
pub fn app(store: SqliteStore, config: &ServerConfig) -> Router {
  let router =
    placement_api::api_router(Arc::new(store)).layer(TraceLayer::new_for_http());
  if config.cors_permissive {
    router.layer(CorsLayer::permissive())
  } else {
    router
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn load(toml: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_config_uses_defaults() {
    let cfg = load("");
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.address(), "127.0.0.1:8000");
  }

  #[test]
  fn file_values_override_defaults() {
    let cfg = load(
      r#"
        port = 9100
        database_path = "/tmp/placements.db"
        cors_permissive = false
      "#,
    );
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 9100);
    assert_eq!(cfg.database_path, PathBuf::from("/tmp/placements.db"));
    assert!(!cfg.cors_permissive);
  }

  #[tokio::test]
  async fn app_serves_api_routes() {
    use axum::{body::Body, http::{Request, StatusCode}};
    use tower::ServiceExt;

    let store = SqliteStore::open_in_memory().await.unwrap();
    let app = app(store, &ServerConfig::default());
    let req = Request::builder().uri("/colleges").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }
}
