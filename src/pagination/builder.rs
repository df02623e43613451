//! Iterator configuration and builder

use super::iterator::PagedIterator;
use super::types::{
    AdvanceFn, CursorDecision, FetchFn, NextCursorFn, Page, TerminalFn, TerminationPolicy,
};
use crate::settings::IteratorSettings;
use futures::FutureExt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// How the next cursor is derived from a page
pub(crate) enum Advance<C, T, E> {
    Decision(AdvanceFn<C, T, E>),
    NextCursor(NextCursorFn<C, T, E>),
}

impl<C, T, E> Clone for Advance<C, T, E> {
    fn clone(&self) -> Self {
        match self {
            Self::Decision(f) => Self::Decision(Arc::clone(f)),
            Self::NextCursor(f) => Self::NextCursor(Arc::clone(f)),
        }
    }
}

/// Immutable iteration policy owned by a [`PagedIterator`]
///
/// Fetch and advance are optional here so that missing pieces surface as
/// `NotConfigured` when a run starts, not when the iterator is built.
pub struct IteratorConfig<C, T, E> {
    pub(crate) initial_cursor: C,
    pub(crate) fetch: Option<FetchFn<C, T, E>>,
    pub(crate) advance: Option<Advance<C, T, E>>,
    pub(crate) terminal: Option<TerminalFn<C>>,
    pub(crate) max_pages: Option<u64>,
    pub(crate) timeout: Option<Duration>,
}

impl<C: Clone, T, E> Clone for IteratorConfig<C, T, E> {
    fn clone(&self) -> Self {
        Self {
            initial_cursor: self.initial_cursor.clone(),
            fetch: self.fetch.clone(),
            advance: self.advance.clone(),
            terminal: self.terminal.clone(),
            max_pages: self.max_pages,
            timeout: self.timeout,
        }
    }
}

impl<C, T, E> IteratorConfig<C, T, E> {
    /// The cursor every run starts from
    pub fn initial_cursor(&self) -> &C {
        &self.initial_cursor
    }

    /// The termination policy, if an advance function is configured
    pub fn policy(&self) -> Option<TerminationPolicy> {
        self.advance.as_ref().map(|advance| match advance {
            Advance::Decision(_) => TerminationPolicy::Decision,
            Advance::NextCursor(_) => TerminationPolicy::Predicate,
        })
    }

    /// Whether a fetch function is set
    pub fn has_fetch(&self) -> bool {
        self.fetch.is_some()
    }

    /// Whether a terminal predicate is set
    pub fn has_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    /// Page limit per run
    pub fn max_pages(&self) -> Option<u64> {
        self.max_pages
    }

    /// Time limit per run
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl<C: std::fmt::Debug, T, E> std::fmt::Debug for IteratorConfig<C, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IteratorConfig")
            .field("initial_cursor", &self.initial_cursor)
            .field("has_fetch", &self.fetch.is_some())
            .field("policy", &self.policy())
            .field("has_terminal", &self.terminal.is_some())
            .field("max_pages", &self.max_pages)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builder for [`PagedIterator`]
///
/// ```rust,ignore
/// let iterator = PagedIterator::<u64, Entity, MyError>::builder()
///     .fetch_page(move |cursor| api.clone().list_after(cursor))
///     .advance(strategies::last_item(|e: &Entity| e.id))
///     .build();
/// ```
pub struct PagedIteratorBuilder<C, T, E> {
    config: IteratorConfig<C, T, E>,
}

impl<C: Default, T, E> Default for PagedIteratorBuilder<C, T, E> {
    fn default() -> Self {
        Self::starting_at(C::default())
    }
}

impl<C, T, E> PagedIteratorBuilder<C, T, E> {
    /// Start a builder with an explicit initial cursor
    pub fn starting_at(initial_cursor: C) -> Self {
        Self {
            config: IteratorConfig {
                initial_cursor,
                fetch: None,
                advance: None,
                terminal: None,
                max_pages: None,
                timeout: None,
            },
        }
    }

    /// Set the initial cursor
    #[must_use]
    pub fn initial_cursor(mut self, cursor: C) -> Self {
        self.config.initial_cursor = cursor;
        self
    }

    /// Set the page fetch function
    #[must_use]
    pub fn fetch_page<F, Fut>(mut self, fetch: F) -> Self
    where
        F: Fn(C) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Page<T>, E>> + Send + 'static,
    {
        let fetch: FetchFn<C, T, E> = Arc::new(move |cursor: C| fetch(cursor).boxed());
        self.config.fetch = Some(fetch);
        self
    }

    /// Use the explicit-decision policy: `advance` says whether to stop
    ///
    /// Replaces any function set with [`next_cursor`](Self::next_cursor).
    #[must_use]
    pub fn advance<F>(mut self, advance: F) -> Self
    where
        F: Fn(&Page<T>, &C) -> Result<CursorDecision<C>, E> + Send + Sync + 'static,
    {
        self.config.advance = Some(Advance::Decision(Arc::new(advance)));
        self
    }

    /// Use the predicate policy: `next_cursor` only computes the cursor and
    /// [`terminal_when`](Self::terminal_when) decides whether it is the end
    ///
    /// Replaces any function set with [`advance`](Self::advance).
    #[must_use]
    pub fn next_cursor<F>(mut self, next_cursor: F) -> Self
    where
        F: Fn(&Page<T>) -> Result<C, E> + Send + Sync + 'static,
    {
        self.config.advance = Some(Advance::NextCursor(Arc::new(next_cursor)));
        self
    }

    /// Set the terminal predicate
    ///
    /// Checked against the initial cursor before the first fetch, then
    /// against every cursor produced by the advance function.
    #[must_use]
    pub fn terminal_when<F>(mut self, is_terminal: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.config.terminal = Some(Arc::new(is_terminal));
        self
    }

    /// Stop successfully after this many pages
    #[must_use]
    pub fn max_pages(mut self, max_pages: u64) -> Self {
        self.config.max_pages = Some(max_pages);
        self
    }

    /// Fail with `DeadlineExceeded` once a run has taken longer than this
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Apply limits from loaded settings; unset fields leave the builder alone
    #[must_use]
    pub fn with_settings(mut self, settings: &IteratorSettings) -> Self {
        if let Some(max_pages) = settings.max_pages {
            self.config.max_pages = Some(max_pages);
        }
        if let Some(timeout) = settings.timeout() {
            self.config.timeout = Some(timeout);
        }
        self
    }

    /// Finish configuration. Never fails and never fetches.
    pub fn build(self) -> PagedIterator<C, T, E> {
        PagedIterator::from_config(self.config)
    }
}
