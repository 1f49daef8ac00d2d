//! Handler for `POST /search`.
//!
//! With one field present the matching single-field search runs; with more,
//! every present field must match. With none, the result is empty.

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use placement_core::{query::SearchFilter, store::PlacementStore};
use serde::Deserialize;

use crate::{
  error::ApiError,
  records::{RecordRow, rows},
};

#[derive(Debug, Default, Deserialize)]
pub struct SearchBody {
  /// Substring of the college name.
  pub college_name: Option<String>,
  /// Exact company name, ignoring case.
  pub company_name: Option<String>,
  /// Exact role, ignoring case.
  pub role:         Option<String>,
}

/// `POST /search`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<SearchBody>, JsonRejection>,
) -> Result<Json<Vec<RecordRow>>, ApiError>
where
  S: PlacementStore,
{
  let Json(body) = body?;

  let records = match (body.college_name, body.company_name, body.role) {
    (None, None, None) => return Ok(Json(Vec::new())),
    (Some(college), None, None) => store.search_by_college(&college).await,
    (None, Some(company), None) => store.search_by_company(&company).await,
    (None, None, Some(role)) => store.search_by_role(&role).await,
    (college_name, company_name, role) => {
      let filter = SearchFilter { college_name, company_name, role };
      store.search_with_filters(&filter).await
    }
  }
  .map_err(ApiError::from_store)?;

  Ok(Json(rows(records)))
}
