// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Solidafy Pager
//!
//! Drive any cursor-paginated source with a reusable, cancellable loop.
//!
//! ## Features
//!
//! - **Any Cursor**: Offsets, page numbers, opaque tokens, last-seen keys
//! - **Two Stop Policies**: Advance decisions or a terminal-cursor predicate
//! - **Item or Page Handlers**: Sync closures or async trait impls
//! - **Cancellation**: Tokens and deadlines checked between pages
//! - **Run Limits**: Page caps and timeouts from code or YAML settings
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solidafy_pager::{strategies, PagedIterator, RunContext, StopResult};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), MyError> {
//!     let iterator = PagedIterator::<u64, Item, MyError>::builder()
//!         .fetch_page(|offset: u64| async move { client.list(offset, 100).await })
//!         .advance(strategies::offset(100))
//!         .build();
//!
//!     let stats = iterator
//!         .for_each(&RunContext::new(), |item: &Item| {
//!             println!("{item:?}");
//!             Ok(StopResult::Continue)
//!         })
//!         .await?;
//!
//!     println!("{} pages", stats.pages_fetched);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        PagedIterator                            │
//! │  iterate(ctx, item handler)    iterate_batch(ctx, page handler) │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌─────────────┬────────────────┴──┬────────────────┬──────────────┐
//! │   Fetch     │     Dispatch      │    Advance     │  Terminate   │
//! ├─────────────┼───────────────────┼────────────────┼──────────────┤
//! │ cursor →    │ per item          │ Continue(next) │ Done         │
//! │ page        │ per page          │ next cursor    │ predicate    │
//! │             │ Stop from handler │                │ page limit   │
//! └─────────────┴───────────────────┴────────────────┴──────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Paged iteration loop, handlers and strategies
pub mod pagination;

/// Run limits loaded from YAML
pub mod settings;

/// Record decoders (JSON, JSONL)
pub mod decode;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, IterError, Result};
pub use pagination::{
    strategies, CursorDecision, IterationStats, ItemHandler, Page, PageHandler, PagedIterator,
    PagedIteratorBuilder, RunContext, StopReason, StopResult, TerminationPolicy,
};
pub use settings::IteratorSettings;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
