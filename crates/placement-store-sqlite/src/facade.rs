//! The record façade: add, edit and delete composite records, each as one
//! transaction over the repositories.
//!
//! A transaction that is dropped without `commit` rolls back, so any error
//! returned from inside [`in_transaction`] leaves the database untouched.

use placement_core::{
  Error as CoreError,
  entity::{College, CollegePatch, Company, CompanyKey, CompanyPatch, NewPerson},
  record::{NewRecord, PlacementRecord, RecordEdit, RecordKey},
};
use rusqlite::{Connection, Transaction};

use crate::{Error, Result, error::is_constraint_violation, query, repo};

/// Run `f` inside a transaction and commit it. A uniqueness conflict that was
/// not resolved by get-or-create becomes [`Error::Integrity`].
pub fn in_transaction<T>(
  conn: &mut Connection,
  f: impl FnOnce(&Transaction<'_>) -> Result<T>,
) -> Result<T> {
  let tx = conn.transaction()?;
  let value = f(&tx).map_err(|e| {
    let e = into_integrity(e);
    tracing::warn!(error = %e, "rolling back");
    e
  })?;
  tx.commit().map_err(|e| into_integrity(e.into()))?;
  Ok(value)
}

fn into_integrity(e: Error) -> Error {
  match e {
    Error::Uniqueness(what) => Error::Integrity(what),
    Error::Sqlite(e) if is_constraint_violation(&e) => {
      Error::Integrity(e.to_string())
    }
    other => other,
  }
}

// ─── Add / edit / delete ─────────────────────────────────────────────────────

pub fn add_record(conn: &mut Connection, record: &NewRecord) -> Result<PlacementRecord> {
  in_transaction(conn, |tx| {
    let (college, company) = link_endpoints(
      tx,
      &record.college_name,
      &record.company,
      record.person.as_ref(),
    )?;

    tracing::info!(
      college = %college.name,
      company = %company.name,
      role = %company.role,
      ctc = company.ctc,
      "record added"
    );
    load_record(tx, &college, &company)
  })
}

/// Delete the old link, then add the new identity as a fresh record.
///
/// If the new identity already exists the edit merges into it and that link
/// keeps its own contact. Otherwise the new link gets the edit's contact
/// fields, or, without any, the old link's contact.
pub fn edit_record(conn: &mut Connection, edit: &RecordEdit) -> Result<PlacementRecord> {
  in_transaction(conn, |tx| {
    let (old_college, old_company) = find_endpoints(tx, &edit.old)?;
    let old_link = repo::get_link(tx, old_college.id, old_company.id)?
      .ok_or_else(|| missing_link(&edit.old))?;

    let carried = match (&edit.person, old_link.person_id) {
      (None, Some(id)) => repo::get_person(tx, id)?.map(|p| NewPerson {
        name:           p.name,
        linkedin_id:    p.linkedin_id,
        email:          p.email,
        contact_number: p.contact_number,
      }),
      _ => None,
    };

    repo::unlink(tx, old_college.id, old_company.id)?;

    let (college, company) = link_endpoints(
      tx,
      &edit.new.college_name,
      &edit.new.company,
      edit.person.as_ref().or(carried.as_ref()),
    )?;

    repo::remove_orphans(tx, old_college.id, old_company.id)?;

    tracing::info!(
      old_college = %old_college.name,
      old_company = %old_company.name,
      college = %college.name,
      company = %company.name,
      "record edited"
    );
    load_record(tx, &college, &company)
  })
}

pub fn delete_record(conn: &mut Connection, key: &RecordKey) -> Result<()> {
  in_transaction(conn, |tx| {
    let (college, company) = find_endpoints(tx, key)?;
    if !repo::unlink(tx, college.id, company.id)? {
      return Err(missing_link(key));
    }
    repo::remove_orphans(tx, college.id, company.id)?;

    tracing::info!(
      college = %college.name,
      company = %company.name,
      role = %company.role,
      "record deleted"
    );
    Ok(())
  })
}

// ─── Entity updates ──────────────────────────────────────────────────────────

pub fn update_college(
  conn: &mut Connection,
  id: i64,
  patch: &CollegePatch,
) -> Result<College> {
  in_transaction(conn, |tx| repo::update_college(tx, id, patch))
}

pub fn update_company(
  conn: &mut Connection,
  id: i64,
  patch: &CompanyPatch,
) -> Result<Company> {
  in_transaction(conn, |tx| repo::update_company(tx, id, patch))
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Get-or-create both endpoints and the link between them. `person` is
/// attached only if the link is new; an existing link is left unchanged.
fn link_endpoints(
  tx: &Transaction<'_>,
  college_name: &str,
  company: &CompanyKey,
  person: Option<&NewPerson>,
) -> Result<(College, Company)> {
  let college = repo::get_or_create_college(tx, college_name)?;
  let company = repo::get_or_create_company(tx, company)?;
  repo::get_or_create_link(tx, &college, &company, person)?;
  Ok((college, company))
}

fn find_endpoints(tx: &Transaction<'_>, key: &RecordKey) -> Result<(College, Company)> {
  let college = repo::get_college(tx, &key.college_name)?.ok_or_else(|| {
    CoreError::NotFound(format!("college {:?}", key.college_name))
  })?;
  let company = repo::get_company(tx, &key.company)?.ok_or_else(|| {
    CoreError::NotFound(format!(
      "company {:?} with role {:?} and ctc {}",
      key.company.name, key.company.role, key.company.ctc
    ))
  })?;
  Ok((college, company))
}

fn missing_link(key: &RecordKey) -> Error {
  CoreError::NotFound(format!(
    "no record links college {:?} to company {:?} ({})",
    key.college_name, key.company.name, key.company.role
  ))
  .into()
}

fn load_record(
  tx: &Transaction<'_>,
  college: &College,
  company: &Company,
) -> Result<PlacementRecord> {
  query::get_record(tx, college.id, company.id)?.ok_or_else(|| {
    Error::Integrity(format!(
      "record for college {} and company {} is missing after write",
      college.id, company.id
    ))
  })
}
