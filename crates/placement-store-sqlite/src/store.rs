//! [`SqliteStore`]: the SQLite implementation of [`PlacementStore`].

use std::path::Path;

use placement_core::{
  analytics::{AnalyticsSummary, TopCtcItem, TopListItem},
  entity::{College, CollegePatch, Company, CompanyPatch},
  query::{Order, SearchFilter, SortBy},
  record::{EditFields, PlacementRecord, RecordFields, RecordKeyFields},
  store::PlacementStore,
};

use crate::{
  Error, Result, facade, query, repo,
  schema::{SCHEMA, register_functions},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A placement store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. All calls
/// are serialised onto the connection's thread, so each write's transaction
/// runs without interleaving.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        register_functions(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `f` on the connection thread, keeping its domain error intact.
  pub(crate) async fn with_conn<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&mut rusqlite::Connection) -> Result<T> + Send + 'static,
    T: Send + 'static,
  {
    self.conn.call(move |conn| Ok(f(conn))).await?
  }
}

// ─── PlacementStore impl ─────────────────────────────────────────────────────

impl PlacementStore for SqliteStore {
  type Error = Error;

  // ── Entities ──────────────────────────────────────────────────────────────

  async fn fetch_all_colleges(&self) -> Result<Vec<College>> {
    self.with_conn(|conn| repo::list_colleges(conn)).await
  }

  async fn fetch_all_companies(&self) -> Result<Vec<Company>> {
    self.with_conn(|conn| repo::list_companies(conn)).await
  }

  async fn update_college(&self, id: i64, patch: CollegePatch) -> Result<College> {
    patch.validate()?;
    self
      .with_conn(move |conn| facade::update_college(conn, id, &patch))
      .await
  }

  async fn update_company(&self, id: i64, patch: CompanyPatch) -> Result<Company> {
    patch.validate()?;
    self
      .with_conn(move |conn| facade::update_company(conn, id, &patch))
      .await
  }

  // ── Records ───────────────────────────────────────────────────────────────

  async fn fetch_all(&self) -> Result<Vec<PlacementRecord>> {
    self.with_conn(|conn| query::fetch_all(conn)).await
  }

  async fn fetch_all_sorted(
    &self,
    sort_by: SortBy,
    order: Order,
  ) -> Result<Vec<PlacementRecord>> {
    self
      .with_conn(move |conn| query::fetch_all_sorted(conn, sort_by, order))
      .await
  }

  async fn search_by_college(&self, college_name: &str) -> Result<Vec<PlacementRecord>> {
    let college_name = college_name.to_owned();
    self
      .with_conn(move |conn| query::search_by_college(conn, &college_name))
      .await
  }

  async fn search_by_company(&self, company_name: &str) -> Result<Vec<PlacementRecord>> {
    let company_name = company_name.to_owned();
    self
      .with_conn(move |conn| query::search_by_company(conn, &company_name))
      .await
  }

  async fn search_by_role(&self, role: &str) -> Result<Vec<PlacementRecord>> {
    let role = role.to_owned();
    self
      .with_conn(move |conn| query::search_by_role(conn, &role))
      .await
  }

  async fn search_with_filters(
    &self,
    filter: &SearchFilter,
  ) -> Result<Vec<PlacementRecord>> {
    let filter = filter.clone().normalized();
    self
      .with_conn(move |conn| query::search_with_filters(conn, &filter))
      .await
  }

  // ── Analytics ─────────────────────────────────────────────────────────────

  async fn analytics_summary(&self) -> Result<AnalyticsSummary> {
    self.with_conn(|conn| query::analytics_summary(conn)).await
  }

  async fn top_companies_by_visits(&self, n: usize) -> Result<Vec<TopListItem>> {
    self
      .with_conn(move |conn| query::top_companies_by_visits(conn, n))
      .await
  }

  async fn top_colleges_by_visits(&self, n: usize) -> Result<Vec<TopListItem>> {
    self
      .with_conn(move |conn| query::top_colleges_by_visits(conn, n))
      .await
  }

  async fn top_placements_by_ctc(&self, n: usize) -> Result<Vec<TopCtcItem>> {
    self
      .with_conn(move |conn| query::top_placements_by_ctc(conn, n))
      .await
  }

  // ── Record façade ─────────────────────────────────────────────────────────

  async fn add_record(&self, fields: RecordFields) -> Result<PlacementRecord> {
    let record = fields.validate()?;
    self
      .with_conn(move |conn| facade::add_record(conn, &record))
      .await
  }

  async fn edit_record(&self, fields: EditFields) -> Result<PlacementRecord> {
    let edit = fields.validate()?;
    self
      .with_conn(move |conn| facade::edit_record(conn, &edit))
      .await
  }

  async fn delete_record(&self, fields: RecordKeyFields) -> Result<()> {
    let key = fields.validate()?;
    self
      .with_conn(move |conn| facade::delete_record(conn, &key))
      .await
  }
}
