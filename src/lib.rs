//! Reconciles application state with locally cached asynchronous values.
//!
//! A caller derives a fixed-shape set of [`AsyncSelectorResult`]s from application state.
//! [`reconcile`] executes pending commands one at a time until no result carries a command,
//! then merges the results with the previous ones under stale-while-revalidate rules.
//!
//! Caches are plain immutable snapshots mutated through [`CacheReducer`], usually wired through
//! a [`CacheDefinition`].
extern crate self as async_reconcile;

mod action;
mod async_value;
mod cache;
mod cache_definition;
mod equality;
mod error;
mod fetch;
mod limiter;
mod reconcile;
mod reducer;
mod request_id;
mod select;
mod tracked;

pub use action::*;
pub use async_value::*;
pub use cache::*;
pub use cache_definition::*;
pub use equality::*;
pub use error::*;
pub use fetch::*;
pub use limiter::*;
pub use reconcile::*;
pub use reducer::*;
pub use request_id::*;
pub use select::*;
pub use tracked::*;

/// Implements [`AsyncProps`] for a struct by visiting its fields in declaration order.
///
/// Every field must itself implement [`AsyncProps`] for the same application state, own props
/// and command types.
pub use async_reconcile_macros::AsyncProps;
