//! SQL schema for the placement SQLite store, plus the SQL functions the
//! queries rely on.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

use rusqlite::{Connection, functions::FunctionFlags};

/// Name of the Unicode lower-casing SQL function. SQLite's own `lower()` and
/// `NOCASE` only fold ASCII.
pub const CASEFOLD: &str = "casefold";

/// Register [`CASEFOLD`] on `conn`. NULL folds to NULL.
pub fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    CASEFOLD,
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| {
      let value: Option<String> = ctx.get(0)?;
      Ok(value.map(|s| s.to_lowercase()))
    },
  )
}

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS colleges (
    id    INTEGER PRIMARY KEY,
    name  TEXT NOT NULL UNIQUE
);

-- The same company name with another role or CTC is a separate row.
CREATE TABLE IF NOT EXISTS companies (
    id    INTEGER PRIMARY KEY,
    name  TEXT NOT NULL,
    role  TEXT NOT NULL,
    ctc   REAL NOT NULL CHECK (ctc >= 0),
    CONSTRAINT uix_company_role_ctc UNIQUE (name, role, ctc)
);

-- Recruiter contacts. Each row is owned by exactly one link and deleted
-- with it.
CREATE TABLE IF NOT EXISTS persons (
    id              INTEGER PRIMARY KEY,
    name            TEXT,
    linkedin_id     TEXT,
    email           TEXT,
    contact_number  TEXT
);

CREATE TABLE IF NOT EXISTS link (
    college_id  INTEGER NOT NULL REFERENCES colleges(id),
    company_id  INTEGER NOT NULL REFERENCES companies(id),
    person_id   INTEGER REFERENCES persons(id),
    PRIMARY KEY (college_id, company_id),
    UNIQUE (person_id)
);

CREATE INDEX IF NOT EXISTS link_company_idx ON link(company_id);

PRAGMA user_version = 1;
";
