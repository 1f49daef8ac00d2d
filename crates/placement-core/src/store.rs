//! The `PlacementStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `placement-store-sqlite`). The API layer depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::{
  StoreError,
  analytics::{AnalyticsSummary, TopCtcItem, TopListItem},
  entity::{College, CollegePatch, Company, CompanyPatch},
  query::{Order, SearchFilter, SortBy},
  record::{EditFields, PlacementRecord, RecordFields, RecordKeyFields},
};

/// Abstraction over a placement store backend.
///
/// Every write is one unit of work: either all of its changes persist or
/// none do. Colleges and companies are created on first reference and removed
/// once their last link is gone.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait PlacementStore: Send + Sync {
  type Error: StoreError;

  // ── Entities ──────────────────────────────────────────────────────────

  fn fetch_all_colleges(
    &self,
  ) -> impl Future<Output = Result<Vec<College>, Self::Error>> + Send + '_;

  fn fetch_all_companies(
    &self,
  ) -> impl Future<Output = Result<Vec<Company>, Self::Error>> + Send + '_;

  /// Rename a college. Fails with a not-found error for an unknown id and an
  /// integrity error if the new name is taken.
  fn update_college(
    &self,
    id: i64,
    patch: CollegePatch,
  ) -> impl Future<Output = Result<College, Self::Error>> + Send + '_;

  /// Apply a partial update to a company. Fails with an integrity error if
  /// the result collides with another company's `(name, role, ctc)`.
  fn update_company(
    &self,
    id: i64,
    patch: CompanyPatch,
  ) -> impl Future<Output = Result<Company, Self::Error>> + Send + '_;

  // ── Records ───────────────────────────────────────────────────────────

  /// All records in storage order.
  fn fetch_all(
    &self,
  ) -> impl Future<Output = Result<Vec<PlacementRecord>, Self::Error>> + Send + '_;

  fn fetch_all_sorted(
    &self,
    sort_by: SortBy,
    order: Order,
  ) -> impl Future<Output = Result<Vec<PlacementRecord>, Self::Error>> + Send + '_;

  /// Records whose college name contains `college_name`, ignoring case.
  fn search_by_college<'a>(
    &'a self,
    college_name: &'a str,
  ) -> impl Future<Output = Result<Vec<PlacementRecord>, Self::Error>> + Send + 'a;

  /// Records whose company name equals `company_name`, ignoring case.
  fn search_by_company<'a>(
    &'a self,
    company_name: &'a str,
  ) -> impl Future<Output = Result<Vec<PlacementRecord>, Self::Error>> + Send + 'a;

  /// Records whose role equals `role`, ignoring case.
  fn search_by_role<'a>(
    &'a self,
    role: &'a str,
  ) -> impl Future<Output = Result<Vec<PlacementRecord>, Self::Error>> + Send + 'a;

  fn search_with_filters<'a>(
    &'a self,
    filter: &'a SearchFilter,
  ) -> impl Future<Output = Result<Vec<PlacementRecord>, Self::Error>> + Send + 'a;

  // ── Analytics ─────────────────────────────────────────────────────────

  fn analytics_summary(
    &self,
  ) -> impl Future<Output = Result<AnalyticsSummary, Self::Error>> + Send + '_;

  fn top_companies_by_visits(
    &self,
    n: usize,
  ) -> impl Future<Output = Result<Vec<TopListItem>, Self::Error>> + Send + '_;

  fn top_colleges_by_visits(
    &self,
    n: usize,
  ) -> impl Future<Output = Result<Vec<TopListItem>, Self::Error>> + Send + '_;

  fn top_placements_by_ctc(
    &self,
    n: usize,
  ) -> impl Future<Output = Result<Vec<TopCtcItem>, Self::Error>> + Send + '_;

  // ── Record façade ─────────────────────────────────────────────────────

  /// Validate `fields`, then get-or-create the college, the company and the
  /// link between them, attaching a new contact if one was given.
  fn add_record(
    &self,
    fields: RecordFields,
  ) -> impl Future<Output = Result<PlacementRecord, Self::Error>> + Send + '_;

  /// Remove the old link and add the new record in one unit of work.
  fn edit_record(
    &self,
    fields: EditFields,
  ) -> impl Future<Output = Result<PlacementRecord, Self::Error>> + Send + '_;

  /// Remove the link identified by `fields` and any endpoint left without
  /// links.
  fn delete_record(
    &self,
    fields: RecordKeyFields,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
