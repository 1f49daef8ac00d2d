//! Error types for `placement-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A required field is missing or malformed. Raised before the store is
  /// touched.
  #[error("validation error: {0}")]
  Validation(String),

  /// A sort key, order or similar enumerated argument is not recognised.
  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  /// A referenced college, company or link does not exist.
  #[error("not found: {0}")]
  NotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Coarse classification of a store failure, used by outer layers to pick a
/// response without knowing the backend's concrete error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
  Validation,
  NotFound,
  /// A uniqueness or foreign-key violation at commit; the unit of work was
  /// rolled back.
  Integrity,
  Internal,
}

/// Implemented by every [`PlacementStore`](crate::store::PlacementStore)
/// error type.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn class(&self) -> ErrorClass;
}

impl StoreError for Error {
  fn class(&self) -> ErrorClass {
    match self {
      Error::Validation(_) | Error::InvalidArgument(_) => ErrorClass::Validation,
      Error::NotFound(_) => ErrorClass::NotFound,
    }
  }
}
