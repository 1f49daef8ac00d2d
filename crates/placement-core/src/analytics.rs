//! Aggregate read models for the analytics view.

use serde::{Deserialize, Serialize};

/// Headline counts over the whole store.
///
/// CTC statistics are taken over placements (links), so a company placed at
/// two colleges counts twice. They are `None` when there are no placements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
  pub total_placements: u64,
  pub total_colleges:   u64,
  pub total_companies:  u64,
  pub average_ctc:      Option<f64>,
  pub min_ctc:          Option<f64>,
  pub max_ctc:          Option<f64>,
}

/// A name with the number of placements it appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopListItem {
  pub name:  String,
  pub count: u64,
}

/// A single placement ranked by CTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCtcItem {
  pub college_name: String,
  pub company_name: String,
  pub role:         String,
  pub ctc:          f64,
}
