//! Handlers for composite placement records.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/view` | Body: `{"sort_by"?, "order"?}`; no `sort_by` → storage order |
//! | `POST` | `/add` | Body: [`RecordFields`]; returns 201 |
//! | `POST` | `/edit-college-company` | Body: [`EditFields`] |
//! | `POST` | `/delete-college-company` | Body: [`RecordKeyFields`] |
//! | `POST` | `/import` | Body: array of [`RecordFields`]; one unit of work per row |

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use placement_core::{
  query::{Order, SortBy},
  record::{EditFields, PlacementRecord, RecordFields, RecordKeyFields},
  store::PlacementStore,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiError;

// ─── Row shape ───────────────────────────────────────────────────────────────

/// A record flattened for JSON clients. `id` is the row's position in the
/// result, not a database key.
#[derive(Debug, Serialize)]
pub struct RecordRow {
  pub id:             usize,
  pub college_name:   String,
  pub company_name:   String,
  pub role:           String,
  pub ctc:            f64,
  pub hr_name:        Option<String>,
  pub linkedin_id:    Option<String>,
  pub email:          Option<String>,
  pub contact_number: Option<String>,
}

impl RecordRow {
  pub fn new(id: usize, record: PlacementRecord) -> Self {
    let person = record.person;
    let (hr_name, linkedin_id, email, contact_number) = match person {
      Some(p) => (p.name, p.linkedin_id, p.email, p.contact_number),
      None => (None, None, None, None),
    };
    Self {
      id,
      college_name: record.college.name,
      company_name: record.company.name,
      role: record.company.role,
      ctc: record.company.ctc,
      hr_name,
      linkedin_id,
      email,
      contact_number,
    }
  }
}

pub(crate) fn rows(records: Vec<PlacementRecord>) -> Vec<RecordRow> {
  records
    .into_iter()
    .enumerate()
    .map(|(i, r)| RecordRow::new(i, r))
    .collect()
}

// ─── View ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ViewBody {
  /// One of `college_name`, `company_name`, `role`, `ctc`.
  pub sort_by: Option<String>,
  /// `asc` (default) or `desc`.
  pub order:   Option<String>,
}

/// `POST /view`
pub async fn view<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<ViewBody>, JsonRejection>,
) -> Result<Json<Vec<RecordRow>>, ApiError>
where
  S: PlacementStore,
{
  let Json(body) = body?;

  let records = match body.sort_by {
    None => store.fetch_all().await,
    Some(sort_by) => {
      let sort_by = sort_by.parse::<SortBy>()?;
      let order = body
        .order
        .map(|o| o.parse::<Order>())
        .transpose()?
        .unwrap_or_default();
      store.fetch_all_sorted(sort_by, order).await
    }
  }
  .map_err(ApiError::from_store)?;

  Ok(Json(rows(records)))
}

// ─── Add / edit / delete ─────────────────────────────────────────────────────

/// `POST /add`. Responds 201.
pub async fn add<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<RecordFields>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlacementStore,
{
  let Json(fields) = body?;
  store.add_record(fields).await.map_err(ApiError::from_store)?;
  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Data added successfully!" })),
  ))
}

/// `POST /edit-college-company`. Responds 201 with the record as it now
/// stands.
pub async fn edit<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<EditFields>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlacementStore,
{
  let Json(fields) = body?;
  let record = store.edit_record(fields).await.map_err(ApiError::from_store)?;
  Ok((
    StatusCode::CREATED,
    Json(json!({
      "message": "Data successfully updated!",
      "record": RecordRow::new(0, record),
    })),
  ))
}

/// `POST /delete-college-company`. Responds 201.
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<RecordKeyFields>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlacementStore,
{
  let Json(fields) = body?;
  store.delete_record(fields).await.map_err(ApiError::from_store)?;
  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Data successfully deleted!" })),
  ))
}

// ─── Import ──────────────────────────────────────────────────────────────────

/// A row that could not be imported.
#[derive(Debug, Serialize)]
pub struct ImportFailure {
  /// Zero-based position in the submitted array.
  pub row:   usize,
  pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ImportReport {
  pub imported: usize,
  pub failed:   Vec<ImportFailure>,
}

/// `POST /import`. Adds each row on its own, so one bad row does not undo
/// the others. Returns 201 with an [`ImportReport`].
pub async fn import<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<Vec<RecordFields>>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlacementStore,
{
  let Json(batch) = body?;
  let mut report = ImportReport { imported: 0, failed: Vec::new() };

  for (row, fields) in batch.into_iter().enumerate() {
    match store.add_record(fields).await {
      Ok(_) => report.imported += 1,
      Err(e) => {
        tracing::warn!(row, error = %e, "import row rejected");
        report.failed.push(ImportFailure { row, error: e.to_string() });
      }
    }
  }

  Ok((StatusCode::CREATED, Json(report)))
}
