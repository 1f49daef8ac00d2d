//! SQLite backend for the placement store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Repositories and queries are plain
//! synchronous functions over a [`rusqlite::Connection`]; the façade composes
//! them inside one transaction per write.

mod facade;
mod query;
mod repo;
mod row;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
