//! Row decoding between SQLite result rows and domain types.
//!
//! Each decoder reads a fixed run of columns starting at `offset`, so the same
//! helper serves both single-table selects and the record join.

use placement_core::{
  entity::{College, Company, Link, Person},
  record::PlacementRecord,
};
use rusqlite::Row;

pub const COLLEGE_COLUMNS: &str = "id, name";
pub const COMPANY_COLUMNS: &str = "id, name, role, ctc";
pub const PERSON_COLUMNS: &str = "id, name, linkedin_id, email, contact_number";
pub const LINK_COLUMNS: &str = "college_id, company_id, person_id";

/// Columns of the record join, in the order [`record`] expects.
pub const RECORD_COLUMNS: &str = "cl.id, cl.name,
       co.id, co.name, co.role, co.ctc,
       p.id, p.name, p.linkedin_id, p.email, p.contact_number";

pub fn college(row: &Row<'_>, offset: usize) -> rusqlite::Result<College> {
  Ok(College {
    id:   row.get(offset)?,
    name: row.get(offset + 1)?,
  })
}

pub fn company(row: &Row<'_>, offset: usize) -> rusqlite::Result<Company> {
  Ok(Company {
    id:   row.get(offset)?,
    name: row.get(offset + 1)?,
    role: row.get(offset + 2)?,
    ctc:  row.get(offset + 3)?,
  })
}

/// Decode a person from an outer-joined run of columns; a NULL id means the
/// link has no contact.
pub fn person(row: &Row<'_>, offset: usize) -> rusqlite::Result<Option<Person>> {
  let id: Option<i64> = row.get(offset)?;
  id.map(|id| {
    Ok(Person {
      id,
      name:           row.get(offset + 1)?,
      linkedin_id:    row.get(offset + 2)?,
      email:          row.get(offset + 3)?,
      contact_number: row.get(offset + 4)?,
    })
  })
  .transpose()
}

pub fn link(row: &Row<'_>) -> rusqlite::Result<Link> {
  Ok(Link {
    college_id: row.get(0)?,
    company_id: row.get(1)?,
    person_id:  row.get(2)?,
  })
}

pub fn record(row: &Row<'_>) -> rusqlite::Result<PlacementRecord> {
  Ok(PlacementRecord {
    college: college(row, 0)?,
    company: company(row, 2)?,
    person:  person(row, 6)?,
  })
}
