//! Read-side queries over the `college ⋈ link ⋈ company ⟕ person` join, plus
//! the analytics aggregates.
//!
//! College matching is substring and company/role matching is exact; both
//! ignore case through the `casefold` SQL function, which folds non-ASCII
//! letters too.

use placement_core::{
  analytics::{AnalyticsSummary, TopCtcItem, TopListItem},
  query::{Order, SearchFilter, SortBy},
  record::PlacementRecord,
};
use rusqlite::{Connection, ToSql, params};

use crate::{
  Result,
  row::{self, RECORD_COLUMNS},
};

const COLLEGE_CONTAINS: &str = "instr(casefold(cl.name), casefold(?{})) > 0";
const COMPANY_EQUALS: &str = "casefold(co.name) = casefold(?{})";
const ROLE_EQUALS: &str = "casefold(co.role) = casefold(?{})";

/// Run the record join with an optional `WHERE` body and `ORDER BY` prefix.
/// Ties (and unsorted listings) fall back to link insertion order.
fn select_records(
  conn: &Connection,
  conditions: &[String],
  order_by: Option<String>,
  params: &[&dyn ToSql],
) -> Result<Vec<PlacementRecord>> {
  let where_clause = if conditions.is_empty() {
    String::new()
  } else {
    format!("WHERE {}", conditions.join(" AND "))
  };
  let order_clause = match order_by {
    Some(col) => format!("ORDER BY {col}, l.rowid"),
    None => "ORDER BY l.rowid".to_owned(),
  };

  let sql = format!(
    "SELECT {RECORD_COLUMNS}
     FROM link l
     JOIN colleges  cl ON cl.id = l.college_id
     JOIN companies co ON co.id = l.company_id
     LEFT JOIN persons p ON p.id = l.person_id
     {where_clause}
     {order_clause}"
  );

  let mut stmt = conn.prepare(&sql)?;
  let rows = stmt
    .query_map(params, row::record)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

fn condition(template: &str, index: usize) -> String {
  template.replace("{}", &index.to_string())
}

pub fn fetch_all(conn: &Connection) -> Result<Vec<PlacementRecord>> {
  select_records(conn, &[], None, &[])
}

pub fn fetch_all_sorted(
  conn: &Connection,
  sort_by: SortBy,
  order: Order,
) -> Result<Vec<PlacementRecord>> {
  let direction = match order {
    Order::Asc => "ASC",
    Order::Desc => "DESC",
  };
  // Text columns sort case-insensitively; the raw value breaks ties.
  let text = |column: &str| format!("casefold({column}) {direction}, {column} {direction}");
  let order_by = match sort_by {
    SortBy::CollegeName => text("cl.name"),
    SortBy::CompanyName => text("co.name"),
    SortBy::Role => text("co.role"),
    SortBy::Ctc => format!("co.ctc {direction}"),
  };
  select_records(conn, &[], Some(order_by), &[])
}

/// The single record linking `college_id` and `company_id`.
pub fn get_record(
  conn: &Connection,
  college_id: i64,
  company_id: i64,
) -> Result<Option<PlacementRecord>> {
  let mut rows = select_records(
    conn,
    &["l.college_id = ?1".to_owned(), "l.company_id = ?2".to_owned()],
    None,
    params![college_id, company_id],
  )?;
  Ok(rows.pop())
}

pub fn search_by_college(conn: &Connection, college_name: &str) -> Result<Vec<PlacementRecord>> {
  select_records(conn, &[condition(COLLEGE_CONTAINS, 1)], None, params![college_name])
}

pub fn search_by_company(conn: &Connection, company_name: &str) -> Result<Vec<PlacementRecord>> {
  select_records(conn, &[condition(COMPANY_EQUALS, 1)], None, params![company_name])
}

pub fn search_by_role(conn: &Connection, role: &str) -> Result<Vec<PlacementRecord>> {
  select_records(conn, &[condition(ROLE_EQUALS, 1)], None, params![role])
}

/// AND of every present filter. An empty filter matches every record.
pub fn search_with_filters(
  conn: &Connection,
  filter: &SearchFilter,
) -> Result<Vec<PlacementRecord>> {
  let mut conditions = Vec::new();
  let mut values: Vec<&dyn ToSql> = Vec::new();

  for (template, value) in [
    (COLLEGE_CONTAINS, &filter.college_name),
    (COMPANY_EQUALS, &filter.company_name),
    (ROLE_EQUALS, &filter.role),
  ] {
    if let Some(value) = value {
      values.push(value);
      conditions.push(condition(template, values.len()));
    }
  }

  select_records(conn, &conditions, None, &values)
}

// ─── Analytics ───────────────────────────────────────────────────────────────

pub fn analytics_summary(conn: &Connection) -> Result<AnalyticsSummary> {
  let summary = conn.query_row(
    "SELECT
       (SELECT COUNT(*) FROM link),
       (SELECT COUNT(*) FROM colleges),
       (SELECT COUNT(*) FROM companies),
       AVG(co.ctc), MIN(co.ctc), MAX(co.ctc)
     FROM link l
     JOIN companies co ON co.id = l.company_id",
    [],
    |r| {
      Ok(AnalyticsSummary {
        total_placements: r.get::<_, i64>(0)? as u64,
        total_colleges:   r.get::<_, i64>(1)? as u64,
        total_companies:  r.get::<_, i64>(2)? as u64,
        average_ctc:      r.get(3)?,
        min_ctc:          r.get(4)?,
        max_ctc:          r.get(5)?,
      })
    },
  )?;
  Ok(summary)
}

fn top_by_visits(conn: &Connection, name_column: &str, n: usize) -> Result<Vec<TopListItem>> {
  let sql = format!(
    "SELECT {name_column}, COUNT(*) AS visits
     FROM link l
     JOIN colleges  cl ON cl.id = l.college_id
     JOIN companies co ON co.id = l.company_id
     GROUP BY {name_column}
     ORDER BY visits DESC, {name_column} ASC
     LIMIT ?1"
  );
  let mut stmt = conn.prepare(&sql)?;
  let rows = stmt
    .query_map(params![limit(n)], |r| {
      Ok(TopListItem {
        name:  r.get(0)?,
        count: r.get::<_, i64>(1)? as u64,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

/// Company names ranked by how many links reference them, across all roles.
pub fn top_companies_by_visits(conn: &Connection, n: usize) -> Result<Vec<TopListItem>> {
  top_by_visits(conn, "co.name", n)
}

pub fn top_colleges_by_visits(conn: &Connection, n: usize) -> Result<Vec<TopListItem>> {
  top_by_visits(conn, "cl.name", n)
}

pub fn top_placements_by_ctc(conn: &Connection, n: usize) -> Result<Vec<TopCtcItem>> {
  let mut stmt = conn.prepare(
    "SELECT cl.name, co.name, co.role, co.ctc
     FROM link l
     JOIN colleges  cl ON cl.id = l.college_id
     JOIN companies co ON co.id = l.company_id
     ORDER BY co.ctc DESC, cl.name ASC, co.name ASC
     LIMIT ?1",
  )?;
  let rows = stmt
    .query_map(params![limit(n)], |r| {
      Ok(TopCtcItem {
        college_name: r.get(0)?,
        company_name: r.get(1)?,
        role:         r.get(2)?,
        ctc:          r.get(3)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

fn limit(n: usize) -> i64 { i64::try_from(n).unwrap_or(i64::MAX) }
