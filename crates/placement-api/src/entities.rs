//! Handlers for `/colleges` and `/companies`.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/colleges` | |
//! | `PATCH` | `/colleges/{id}` | Body: `{"college_name"?}` |
//! | `GET`   | `/companies` | |
//! | `PATCH` | `/companies/{id}` | Body: `{"company_name"?, "role"?, "ctc"?}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
};
use placement_core::{
  entity::{College, CollegePatch, Company, CompanyPatch},
  store::PlacementStore,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ─── Colleges ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CollegeRow {
  pub id:           i64,
  pub college_name: String,
}

impl From<College> for CollegeRow {
  fn from(c: College) -> Self { Self { id: c.id, college_name: c.name } }
}

/// `GET /colleges`
pub async fn list_colleges<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<CollegeRow>>, ApiError>
where
  S: PlacementStore,
{
  let colleges = store
    .fetch_all_colleges()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(colleges.into_iter().map(CollegeRow::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct CollegePatchBody {
  pub college_name: Option<String>,
}

/// `PATCH /colleges/{id}`
pub async fn update_college<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  body: Result<Json<CollegePatchBody>, JsonRejection>,
) -> Result<Json<CollegeRow>, ApiError>
where
  S: PlacementStore,
{
  let Json(body) = body?;
  let college = store
    .update_college(id, CollegePatch { name: body.college_name })
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(college.into()))
}

// ─── Companies ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CompanyRow {
  pub id:           i64,
  pub company_name: String,
  pub role:         String,
  pub ctc:          f64,
}

impl From<Company> for CompanyRow {
  fn from(c: Company) -> Self {
    Self { id: c.id, company_name: c.name, role: c.role, ctc: c.ctc }
  }
}

/// `GET /companies`
pub async fn list_companies<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<CompanyRow>>, ApiError>
where
  S: PlacementStore,
{
  let companies = store
    .fetch_all_companies()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(companies.into_iter().map(CompanyRow::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct CompanyPatchBody {
  pub company_name: Option<String>,
  pub role:         Option<String>,
  pub ctc:          Option<f64>,
}

/// `PATCH /companies/{id}`
pub async fn update_company<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  body: Result<Json<CompanyPatchBody>, JsonRejection>,
) -> Result<Json<CompanyRow>, ApiError>
where
  S: PlacementStore,
{
  let Json(body) = body?;
  let patch = CompanyPatch {
    name: body.company_name,
    role: body.role,
    ctc:  body.ctc,
  };
  let company = store
    .update_company(id, patch)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(company.into()))
}
