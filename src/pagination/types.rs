//! Pagination types
//!
//! Plain data shared by the builder, the loop and the handlers.

use futures::future::BoxFuture;
use std::sync::Arc;

/// One batch of items returned by a single fetch
pub type Page<T> = Vec<T>;

/// Fetches the page that starts at the given cursor
pub type FetchFn<C, T, E> =
    Arc<dyn Fn(C) -> BoxFuture<'static, Result<Page<T>, E>> + Send + Sync>;

/// Inspects a fetched page (and the cursor that produced it) and decides how to continue
pub type AdvanceFn<C, T, E> =
    Arc<dyn Fn(&Page<T>, &C) -> Result<CursorDecision<C>, E> + Send + Sync>;

/// Derives the next cursor from a fetched page; termination is left to a predicate
pub type NextCursorFn<C, T, E> = Arc<dyn Fn(&Page<T>) -> Result<C, E> + Send + Sync>;

/// Reports whether a cursor means "nothing left to fetch"
pub type TerminalFn<C> = Arc<dyn Fn(&C) -> bool + Send + Sync>;

/// Outcome of inspecting a fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorDecision<C> {
    /// Fetch again starting from this cursor
    Continue(C),
    /// No more pages
    Done,
}

impl<C> CursorDecision<C> {
    /// Create a continuation
    pub fn next(cursor: C) -> Self {
        Self::Continue(cursor)
    }

    /// Build a decision from a `(terminate, next_cursor)` pair
    pub fn from_parts(terminate: bool, next_cursor: C) -> Self {
        if terminate {
            Self::Done
        } else {
            Self::Continue(next_cursor)
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }

    /// The next cursor, if iteration continues
    pub fn cursor(&self) -> Option<&C> {
        match self {
            Self::Continue(cursor) => Some(cursor),
            Self::Done => None,
        }
    }
}

/// What a handler wants the loop to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopResult {
    /// Keep going
    #[default]
    Continue,
    /// Stop now, successfully
    Stop,
}

impl StopResult {
    /// Check if we should continue
    pub fn should_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }

    /// Check if we should stop
    pub fn should_stop(&self) -> bool {
        matches!(self, Self::Stop)
    }
}

impl From<bool> for StopResult {
    /// `true` means "stop"
    fn from(stop: bool) -> Self {
        if stop {
            Self::Stop
        } else {
            Self::Continue
        }
    }
}

/// How a configured iterator decides that it has run out of pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationPolicy {
    /// The advance function returns [`CursorDecision::Done`] itself
    Decision,
    /// The advance function only yields a cursor; a predicate judges it
    Predicate,
}

/// Why a successful run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The initial cursor was already terminal; nothing was fetched
    PreCheck,
    /// The advance function returned `Done`
    Decision,
    /// The next cursor satisfied the terminal predicate
    Predicate,
    /// A handler asked to stop
    Handler,
    /// The configured page limit was reached
    PageLimit,
}

impl StopReason {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreCheck => "pre_check",
            Self::Decision => "decision",
            Self::Predicate => "predicate",
            Self::Handler => "handler",
            Self::PageLimit => "page_limit",
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statistics from a successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationStats {
    /// Pages fetched
    pub pages_fetched: u64,
    /// Items handed to the handler (for page handlers: items in dispatched pages)
    pub items_dispatched: u64,
    /// Why the run ended
    pub stop_reason: StopReason,
}

/// Loop-local state for one run
#[derive(Debug)]
pub(crate) struct IterationState<C> {
    pub(crate) cursor: C,
    pub(crate) pages_fetched: u64,
    pub(crate) items_dispatched: u64,
}

impl<C> IterationState<C> {
    pub(crate) fn new(cursor: C) -> Self {
        Self {
            cursor,
            pages_fetched: 0,
            items_dispatched: 0,
        }
    }

    pub(crate) fn finish(&self, stop_reason: StopReason) -> IterationStats {
        IterationStats {
            pages_fetched: self.pages_fetched,
            items_dispatched: self.items_dispatched,
            stop_reason,
        }
    }
}
