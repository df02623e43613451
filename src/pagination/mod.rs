//! Pagination module
//!
//! Drives a cursor-paginated source: fetch a page, hand it to a handler,
//! derive the next cursor, repeat until told to stop.
//!
//! # Overview
//!
//! - [`PagedIteratorBuilder`] assembles an immutable [`IteratorConfig`]
//! - [`PagedIterator`] runs the loop, once per `iterate` call
//! - [`ItemHandler`] / [`PageHandler`] consume items or whole pages
//! - [`RunContext`] carries cancellation and deadlines
//! - [`strategies`] has advance functions for common cursor shapes
//!
//! Pages are processed strictly one after another. Nothing is retried; the
//! first error from any stage ends the run.

mod builder;
mod context;
mod handler;
mod iterator;
pub mod strategies;
mod types;

pub use builder::{IteratorConfig, PagedIteratorBuilder};
pub use context::RunContext;
pub use handler::{ItemHandler, PageHandler};
pub use iterator::PagedIterator;
pub use types::{
    AdvanceFn, CursorDecision, FetchFn, IterationStats, NextCursorFn, Page, StopReason,
    StopResult, TerminalFn, TerminationPolicy,
};
