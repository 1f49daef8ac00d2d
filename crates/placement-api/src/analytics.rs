//! Handler for `GET /analytics`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use placement_core::store::PlacementStore;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::error::ApiError;

const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsParams {
  /// Length of the top lists. Missing, unparsable or non-positive values fall
  /// back to 5.
  pub n: Option<String>,
}

fn top_n(raw: Option<&str>) -> usize {
  raw
    .and_then(|s| s.trim().parse::<i64>().ok())
    .filter(|n| *n > 0)
    .and_then(|n| usize::try_from(n).ok())
    .unwrap_or(DEFAULT_TOP_N)
}

/// `GET /analytics[?n=<count>]`
///
/// Keys of the top lists embed `n`, e.g. `top_5_companies_by_visits`.
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<AnalyticsParams>,
) -> Result<Json<Value>, ApiError>
where
  S: PlacementStore,
{
  let n = top_n(params.n.as_deref());

  let summary = store.analytics_summary().await.map_err(ApiError::from_store)?;
  let companies = store
    .top_companies_by_visits(n)
    .await
    .map_err(ApiError::from_store)?;
  let colleges = store
    .top_colleges_by_visits(n)
    .await
    .map_err(ApiError::from_store)?;
  let placements = store
    .top_placements_by_ctc(n)
    .await
    .map_err(ApiError::from_store)?;

  let mut body = Map::new();
  body.insert("summary".into(), json!(summary));
  body.insert(format!("top_{n}_companies_by_visits"), json!(companies));
  body.insert(format!("top_{n}_colleges_by_visits"), json!(colleges));
  body.insert(format!("top_{n}_placements_by_ctc"), json!(placements));

  Ok(Json(Value::Object(body)))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn top_n_falls_back_to_default() {
    assert_eq!(top_n(None), 5);
    assert_eq!(top_n(Some("abc")), 5);
    assert_eq!(top_n(Some("0")), 5);
    assert_eq!(top_n(Some("-3")), 5);
    assert_eq!(top_n(Some("3")), 3);
  }
}
