//! Entity repositories: get, create, get-or-create and update for colleges,
//! companies, persons and links.
//!
//! Every function takes a plain [`Connection`]; callers pass a
//! [`rusqlite::Transaction`] (which derefs to one) when the call is part of a
//! larger unit of work. Nothing here commits.
//!
//! Removing a link never removes its endpoints. Callers follow [`unlink`] with
//! [`remove_orphans`].

use placement_core::{
  Error as CoreError,
  entity::{College, CollegePatch, Company, CompanyKey, CompanyPatch, Link, NewPerson, Person},
};
use rusqlite::{Connection, OptionalExtension as _, params};

use crate::{
  Error, Result,
  error::is_unique_violation,
  row::{self, COLLEGE_COLUMNS, COMPANY_COLUMNS, LINK_COLUMNS, PERSON_COLUMNS},
};

// ─── Get-or-create ───────────────────────────────────────────────────────────

/// Look `get` up; if absent, `create`. A create that loses a race to a
/// concurrent writer surfaces as [`Error::Uniqueness`], in which case the row
/// is fetched once more. There is no second retry.
pub fn get_or_create<T>(
  get: impl Fn() -> Result<Option<T>>,
  create: impl FnOnce() -> Result<T>,
) -> Result<T> {
  if let Some(existing) = get()? {
    return Ok(existing);
  }
  match create() {
    Err(Error::Uniqueness(what)) => {
      tracing::debug!(%what, "create lost a race, re-fetching");
      get()?.ok_or(Error::Uniqueness(what))
    }
    other => other,
  }
}

/// Translate a unique-constraint failure on insert into
/// [`Error::Uniqueness`].
fn on_insert<T>(
  result: rusqlite::Result<T>,
  what: impl FnOnce() -> String,
) -> Result<T> {
  match result {
    Err(e) if is_unique_violation(&e) => Err(Error::Uniqueness(what())),
    other => Ok(other?),
  }
}

// ─── Colleges ────────────────────────────────────────────────────────────────

pub fn list_colleges(conn: &Connection) -> Result<Vec<College>> {
  let mut stmt =
    conn.prepare(&format!("SELECT {COLLEGE_COLUMNS} FROM colleges ORDER BY id"))?;
  let rows = stmt
    .query_map([], |r| row::college(r, 0))?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn get_college(conn: &Connection, name: &str) -> Result<Option<College>> {
  Ok(
    conn
      .query_row(
        &format!("SELECT {COLLEGE_COLUMNS} FROM colleges WHERE name = ?1"),
        params![name],
        |r| row::college(r, 0),
      )
      .optional()?,
  )
}

fn get_college_by_id(conn: &Connection, id: i64) -> Result<Option<College>> {
  Ok(
    conn
      .query_row(
        &format!("SELECT {COLLEGE_COLUMNS} FROM colleges WHERE id = ?1"),
        params![id],
        |r| row::college(r, 0),
      )
      .optional()?,
  )
}

pub fn create_college(conn: &Connection, name: &str) -> Result<College> {
  on_insert(
    conn.execute("INSERT INTO colleges (name) VALUES (?1)", params![name]),
    || format!("college {name:?} already exists"),
  )?;
  Ok(College { id: conn.last_insert_rowid(), name: name.to_owned() })
}

pub fn get_or_create_college(conn: &Connection, name: &str) -> Result<College> {
  get_or_create(|| get_college(conn, name), || create_college(conn, name))
}

/// Apply `patch` to the college `id` and return the updated row.
pub fn update_college(
  conn: &Connection,
  id: i64,
  patch: &CollegePatch,
) -> Result<College> {
  let mut college = get_college_by_id(conn, id)?
    .ok_or_else(|| CoreError::NotFound(format!("college {id}")))?;

  if let Some(name) = &patch.name {
    college.name = name.trim().to_owned();
  }

  on_insert(
    conn.execute(
      "UPDATE colleges SET name = ?1 WHERE id = ?2",
      params![college.name, id],
    ),
    || format!("college {:?} already exists", college.name),
  )?;
  Ok(college)
}

// ─── Companies ───────────────────────────────────────────────────────────────

pub fn list_companies(conn: &Connection) -> Result<Vec<Company>> {
  let mut stmt =
    conn.prepare(&format!("SELECT {COMPANY_COLUMNS} FROM companies ORDER BY id"))?;
  let rows = stmt
    .query_map([], |r| row::company(r, 0))?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn get_company(conn: &Connection, key: &CompanyKey) -> Result<Option<Company>> {
  Ok(
    conn
      .query_row(
        &format!(
          "SELECT {COMPANY_COLUMNS} FROM companies
           WHERE name = ?1 AND role = ?2 AND ctc = ?3"
        ),
        params![key.name, key.role, key.ctc],
        |r| row::company(r, 0),
      )
      .optional()?,
  )
}

fn get_company_by_id(conn: &Connection, id: i64) -> Result<Option<Company>> {
  Ok(
    conn
      .query_row(
        &format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE id = ?1"),
        params![id],
        |r| row::company(r, 0),
      )
      .optional()?,
  )
}

pub fn create_company(conn: &Connection, key: &CompanyKey) -> Result<Company> {
  on_insert(
    conn.execute(
      "INSERT INTO companies (name, role, ctc) VALUES (?1, ?2, ?3)",
      params![key.name, key.role, key.ctc],
    ),
    || describe_company(key),
  )?;
  Ok(Company {
    id:   conn.last_insert_rowid(),
    name: key.name.clone(),
    role: key.role.clone(),
    ctc:  key.ctc,
  })
}

pub fn get_or_create_company(conn: &Connection, key: &CompanyKey) -> Result<Company> {
  get_or_create(|| get_company(conn, key), || create_company(conn, key))
}

/// Apply `patch` to the company `id`, leaving absent fields untouched.
pub fn update_company(
  conn: &Connection,
  id: i64,
  patch: &CompanyPatch,
) -> Result<Company> {
  let mut company = get_company_by_id(conn, id)?
    .ok_or_else(|| CoreError::NotFound(format!("company {id}")))?;

  if let Some(name) = &patch.name {
    company.name = name.trim().to_owned();
  }
  if let Some(role) = &patch.role {
    company.role = role.trim().to_owned();
  }
  if let Some(ctc) = patch.ctc {
    company.ctc = ctc;
  }

  on_insert(
    conn.execute(
      "UPDATE companies SET name = ?1, role = ?2, ctc = ?3 WHERE id = ?4",
      params![company.name, company.role, company.ctc, id],
    ),
    || describe_company(&company.key()),
  )?;
  Ok(company)
}

fn describe_company(key: &CompanyKey) -> String {
  format!(
    "company {:?} with role {:?} and ctc {} already exists",
    key.name, key.role, key.ctc
  )
}

// ─── Persons ─────────────────────────────────────────────────────────────────

pub fn create_person(conn: &Connection, person: &NewPerson) -> Result<Person> {
  conn.execute(
    "INSERT INTO persons (name, linkedin_id, email, contact_number)
     VALUES (?1, ?2, ?3, ?4)",
    params![
      person.name,
      person.linkedin_id,
      person.email,
      person.contact_number,
    ],
  )?;
  Ok(Person {
    id:             conn.last_insert_rowid(),
    name:           person.name.clone(),
    linkedin_id:    person.linkedin_id.clone(),
    email:          person.email.clone(),
    contact_number: person.contact_number.clone(),
  })
}

pub fn get_person(conn: &Connection, id: i64) -> Result<Option<Person>> {
  let person = conn
    .query_row(
      &format!("SELECT {PERSON_COLUMNS} FROM persons WHERE id = ?1"),
      params![id],
      |r| row::person(r, 0),
    )
    .optional()?;
  Ok(person.flatten())
}

fn delete_person(conn: &Connection, id: i64) -> Result<()> {
  conn.execute("DELETE FROM persons WHERE id = ?1", params![id])?;
  Ok(())
}

// ─── Links ───────────────────────────────────────────────────────────────────

pub fn get_link(
  conn: &Connection,
  college_id: i64,
  company_id: i64,
) -> Result<Option<Link>> {
  Ok(
    conn
      .query_row(
        &format!(
          "SELECT {LINK_COLUMNS} FROM link
           WHERE college_id = ?1 AND company_id = ?2"
        ),
        params![college_id, company_id],
        row::link,
      )
      .optional()?,
  )
}

/// Insert a link, creating `person` for it first if given.
pub fn create_link(
  conn: &Connection,
  college_id: i64,
  company_id: i64,
  person: Option<&NewPerson>,
) -> Result<Link> {
  let person_id = person
    .map(|p| create_person(conn, p))
    .transpose()?
    .map(|p| p.id);

  let inserted = on_insert(
    conn.execute(
      "INSERT INTO link (college_id, company_id, person_id) VALUES (?1, ?2, ?3)",
      params![college_id, company_id, person_id],
    ),
    || format!("college {college_id} is already linked to company {company_id}"),
  );
  if inserted.is_err()
    && let Some(id) = person_id
  {
    delete_person(conn, id)?;
  }
  inserted?;
  Ok(Link { college_id, company_id, person_id })
}

/// Return the link between the two endpoints, creating it (with `person`) if
/// absent. An existing link is returned unchanged; `person` is only used for
/// a new link.
pub fn get_or_create_link(
  conn: &Connection,
  college: &College,
  company: &Company,
  person: Option<&NewPerson>,
) -> Result<Link> {
  get_or_create(
    || get_link(conn, college.id, company.id),
    || create_link(conn, college.id, company.id, person),
  )
}

/// Remove the link between the two endpoints along with the contact it owns.
///
/// Returns `false` if there was no such link. Endpoints are left in place.
pub fn unlink(conn: &Connection, college_id: i64, company_id: i64) -> Result<bool> {
  let Some(link) = get_link(conn, college_id, company_id)? else {
    return Ok(false);
  };

  conn.execute(
    "DELETE FROM link WHERE college_id = ?1 AND company_id = ?2",
    params![college_id, company_id],
  )?;
  if let Some(person_id) = link.person_id {
    delete_person(conn, person_id)?;
  }
  Ok(true)
}

/// Delete the college and company if no link references them any more.
pub fn remove_orphans(conn: &Connection, college_id: i64, company_id: i64) -> Result<()> {
  let colleges = conn.execute(
    "DELETE FROM colleges
     WHERE id = ?1 AND NOT EXISTS (SELECT 1 FROM link WHERE college_id = ?1)",
    params![college_id],
  )?;
  let companies = conn.execute(
    "DELETE FROM companies
     WHERE id = ?1 AND NOT EXISTS (SELECT 1 FROM link WHERE company_id = ?1)",
    params![company_id],
  )?;

  if colleges + companies > 0 {
    tracing::debug!(
      college_id,
      company_id,
      colleges,
      companies,
      "removed orphaned endpoints"
    );
  }
  Ok(())
}
