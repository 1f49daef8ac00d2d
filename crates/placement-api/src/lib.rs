//! JSON REST API for the placement tracker.
//!
//! Exposes an axum [`Router`] backed by any [`PlacementStore`]. Transport
//! concerns such as CORS and request tracing are left to the binary.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = placement_api::api_router(Arc::new(store));
//! ```

pub mod analytics;
pub mod entities;
pub mod error;
pub mod records;
pub mod search;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch, post},
};
use placement_core::store::PlacementStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PlacementStore + 'static,
{
  Router::new()
    // Entities
    .route("/colleges", get(entities::list_colleges::<S>))
    .route("/colleges/{id}", patch(entities::update_college::<S>))
    .route("/companies", get(entities::list_companies::<S>))
    .route("/companies/{id}", patch(entities::update_company::<S>))
    // Records
    .route("/view", post(records::view::<S>))
    .route("/add", post(records::add::<S>))
    .route("/edit-college-company", post(records::edit::<S>))
    .route("/delete-college-company", post(records::delete::<S>))
    .route("/import", post(records::import::<S>))
    // Queries
    .route("/search", post(search::handler::<S>))
    .route("/analytics", get(analytics::handler::<S>))
    .with_state(store)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use placement_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt;

  use super::*;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = app
      .clone()
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  fn record(college: &str, company: &str, role: &str, ctc: f64) -> Value {
    json!({
      "college_name": college,
      "company_name": company,
      "role": role,
      "ctc": ctc,
    })
  }

  // ── Records ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn add_then_view_lists_flattened_rows() {
    let app = app().await;
    let mut body = record("IIT Delhi", "Acme", "SDE", 12.0);
    body["hr_name"] = json!("Asha");
    body["email"] = json!("asha@acme.test");

    let (status, value) = send(&app, "POST", "/add", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(value["message"], "Data added successfully!");

    let (status, rows) = send(&app, "POST", "/view", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], 0);
    assert_eq!(rows[0]["college_name"], "IIT Delhi");
    assert_eq!(rows[0]["hr_name"], "Asha");
    assert_eq!(rows[0]["linkedin_id"], Value::Null);
  }

  #[tokio::test]
  async fn add_accepts_ctc_as_numeric_string() {
    let app = app().await;
    let mut body = record("NIT Trichy", "Globex", "Analyst", 0.0);
    body["ctc"] = json!("8.5");

    let (status, _) = send(&app, "POST", "/add", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, rows) = send(&app, "POST", "/view", Some(json!({}))).await;
    assert_eq!(rows[0]["ctc"], 8.5);
  }

  #[tokio::test]
  async fn add_missing_field_is_bad_request() {
    let app = app().await;
    let body = json!({ "college_name": "IIT Delhi", "company_name": "Acme" });
    let (status, value) = send(&app, "POST", "/add", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(value["error"].is_string());
  }

  #[tokio::test]
  async fn malformed_json_is_bad_request() {
    let app = app().await;
    let req = Request::builder()
      .method("POST")
      .uri("/add")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn view_sorts_descending_by_ctc() {
    let app = app().await;
    for (college, ctc) in [("A", 5.0), ("B", 20.0), ("C", 10.0)] {
      send(&app, "POST", "/add", Some(record(college, "Acme", "SDE", ctc))).await;
    }

    let body = json!({ "sort_by": "ctc", "order": "desc" });
    let (status, rows) = send(&app, "POST", "/view", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    let colleges: Vec<_> = rows
      .as_array()
      .unwrap()
      .iter()
      .map(|r| r["college_name"].as_str().unwrap().to_owned())
      .collect();
    assert_eq!(colleges, ["B", "C", "A"]);
  }

  #[tokio::test]
  async fn view_rejects_unknown_sort_column() {
    let app = app().await;
    let body = json!({ "sort_by": "salary" });
    let (status, _) = send(&app, "POST", "/view", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn edit_moves_record_to_new_ctc() {
    let app = app().await;
    send(&app, "POST", "/add", Some(record("IIT Delhi", "Acme", "SDE", 12.0))).await;

    let body = json!({
      "old_college_name": "IIT Delhi",
      "old_company_name": "Acme",
      "old_role": "SDE",
      "old_ctc": 12.0,
      "new_ctc": 14.0,
    });
    let (status, value) = send(&app, "POST", "/edit-college-company", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(value["record"]["ctc"], 14.0);

    let (_, companies) = send(&app, "GET", "/companies", None).await;
    let companies = companies.as_array().unwrap();
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0]["ctc"], 14.0);
  }

  #[tokio::test]
  async fn edit_of_missing_record_is_not_found() {
    let app = app().await;
    let body = json!({
      "old_college_name": "Nowhere",
      "old_company_name": "Acme",
      "old_role": "SDE",
      "old_ctc": 1.0,
    });
    let (status, _) = send(&app, "POST", "/edit-college-company", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_removes_record_and_orphans() {
    let app = app().await;
    send(&app, "POST", "/add", Some(record("IIT Delhi", "Acme", "SDE", 12.0))).await;

    let body = record("IIT Delhi", "Acme", "SDE", 12.0);
    let (status, value) =
      send(&app, "POST", "/delete-college-company", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(value["message"], "Data successfully deleted!");

    let (_, colleges) = send(&app, "GET", "/colleges", None).await;
    assert_eq!(colleges, json!([]));

    let (status, _) = send(&app, "POST", "/delete-college-company", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn import_reports_rejected_rows() {
    let app = app().await;
    let body = json!([
      record("A", "Acme", "SDE", 10.0),
      { "college_name": "B" },
      record("C", "Globex", "Analyst", 6.0),
    ]);
    let (status, report) = send(&app, "POST", "/import", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(report["imported"], 2);
    assert_eq!(report["failed"].as_array().unwrap().len(), 1);
    assert_eq!(report["failed"][0]["row"], 1);
  }

  // ── Search ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn search_dispatches_on_present_fields() {
    let app = app().await;
    send(&app, "POST", "/add", Some(record("IIT Delhi", "Acme", "SDE", 12.0))).await;
    send(&app, "POST", "/add", Some(record("IIT Bombay", "Acme", "Analyst", 9.0))).await;
    send(&app, "POST", "/add", Some(record("NIT Trichy", "Globex", "SDE", 7.0))).await;

    let (_, rows) = send(&app, "POST", "/search", Some(json!({ "college_name": "iit" }))).await;
    assert_eq!(rows.as_array().unwrap().len(), 2);

    let (_, rows) = send(&app, "POST", "/search", Some(json!({ "company_name": "ACME" }))).await;
    assert_eq!(rows.as_array().unwrap().len(), 2);

    let body = json!({ "company_name": "acme", "role": "sde" });
    let (_, rows) = send(&app, "POST", "/search", Some(body)).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["college_name"], "IIT Delhi");

    let (status, rows) = send(&app, "POST", "/search", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows, json!([]));
  }

  // ── Entities ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn renaming_college_onto_existing_name_conflicts() {
    let app = app().await;
    send(&app, "POST", "/add", Some(record("A", "Acme", "SDE", 10.0))).await;
    send(&app, "POST", "/add", Some(record("B", "Acme", "SDE", 10.0))).await;

    let (_, colleges) = send(&app, "GET", "/colleges", None).await;
    let id = colleges[1]["id"].as_i64().unwrap();

    let body = json!({ "college_name": "A" });
    let (status, value) = send(&app, "PATCH", &format!("/colleges/{id}"), Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(value["error"].is_string());
  }

  #[tokio::test]
  async fn patch_company_updates_only_given_fields() {
    let app = app().await;
    send(&app, "POST", "/add", Some(record("A", "Acme", "SDE", 10.0))).await;
    let (_, companies) = send(&app, "GET", "/companies", None).await;
    let id = companies[0]["id"].as_i64().unwrap();

    let body = json!({ "role": "Senior SDE" });
    let (status, company) =
      send(&app, "PATCH", &format!("/companies/{id}"), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(company["company_name"], "Acme");
    assert_eq!(company["role"], "Senior SDE");
    assert_eq!(company["ctc"], 10.0);

    let (status, _) = send(&app, "PATCH", "/companies/999", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Analytics ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn analytics_keys_embed_requested_n() {
    let app = app().await;
    send(&app, "POST", "/add", Some(record("A", "Acme", "SDE", 10.0))).await;
    send(&app, "POST", "/add", Some(record("B", "Acme", "SDE", 10.0))).await;
    send(&app, "POST", "/add", Some(record("B", "Globex", "SDE", 20.0))).await;

    let (status, value) = send(&app, "GET", "/analytics?n=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["summary"]["total_placements"], 3);
    assert_eq!(value["summary"]["max_ctc"], 20.0);
    assert_eq!(value["top_1_companies_by_visits"][0]["name"], "Acme");
    assert_eq!(value["top_1_companies_by_visits"][0]["count"], 2);
    assert_eq!(value["top_1_colleges_by_visits"][0]["name"], "B");
    assert_eq!(value["top_1_placements_by_ctc"][0]["company_name"], "Globex");

    let (_, value) = send(&app, "GET", "/analytics?n=oops", None).await;
    assert!(value.get("top_5_companies_by_visits").is_some());
  }

  #[tokio::test]
  async fn analytics_on_empty_store_has_null_ctc_stats() {
    let app = app().await;
    let (status, value) = send(&app, "GET", "/analytics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["summary"]["total_placements"], 0);
    assert_eq!(value["summary"]["average_ctc"], Value::Null);
    assert_eq!(value["top_5_placements_by_ctc"], json!([]));
  }
}
