//! Core types and trait definitions for the placement tracker.
//!
//! This crate has no HTTP or database dependencies.
//! Storage backends implement [`store::PlacementStore`]; the API layer
//! depends on that abstraction only.

// Native `async fn` in traits; the `Send` bounds are spelled out on the trait.
#![allow(async_fn_in_trait)]

pub mod analytics;
pub mod entity;
pub mod error;
pub mod query;
pub mod record;
pub mod store;

pub use error::{Error, ErrorClass, Result, StoreError};
