//! Error type for `placement-store-sqlite`.

use placement_core::{ErrorClass, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] placement_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("sqlite error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  /// An insert hit a unique constraint. Get-or-create resolves this by
  /// re-fetching; it never escapes a unit of work as-is.
  #[error("uniqueness violation: {0}")]
  Uniqueness(String),

  /// A constraint failed inside a unit of work, which was rolled back.
  #[error("database integrity error: {0}")]
  Integrity(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl StoreError for Error {
  fn class(&self) -> ErrorClass {
    match self {
      Error::Core(e) => e.class(),
      Error::Uniqueness(_) | Error::Integrity(_) => ErrorClass::Integrity,
      Error::Sqlite(e) if is_constraint_violation(e) => ErrorClass::Integrity,
      Error::Database(tokio_rusqlite::Error::Rusqlite(e))
        if is_constraint_violation(e) =>
      {
        ErrorClass::Integrity
      }
      Error::Database(_) | Error::Sqlite(_) => ErrorClass::Internal,
    }
  }
}

pub(crate) fn is_constraint_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(f, _)
      if f.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

/// Unique and primary-key conflicts only; foreign-key and check failures are
/// not something a re-fetch can resolve.
pub(crate) fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(f, _)
      if f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        || f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
  )
}
