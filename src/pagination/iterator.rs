//! The paging loop

use super::builder::{Advance, IteratorConfig, PagedIteratorBuilder};
use super::context::RunContext;
use super::handler::{Dispatch, ItemHandler, PageHandler, PerItem, WholePage};
use super::types::{
    CursorDecision, IterationState, IterationStats, Page, StopReason, StopResult,
    TerminationPolicy,
};
use crate::error::IterError;
use std::sync::Arc;
use tracing::{debug, trace};

/// Reusable driver for a paginated source
///
/// Holds only the immutable [`IteratorConfig`]; every call to
/// [`iterate`](Self::iterate) or [`iterate_batch`](Self::iterate_batch) starts
/// again from the initial cursor with its own loop state. Cloning is cheap.
pub struct PagedIterator<C, T, E> {
    config: Arc<IteratorConfig<C, T, E>>,
}

impl<C, T, E> Clone for PagedIterator<C, T, E> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
        }
    }
}

impl<C: std::fmt::Debug, T, E> std::fmt::Debug for PagedIterator<C, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedIterator")
            .field("config", &self.config)
            .finish()
    }
}

impl<C: Default, T, E> PagedIterator<C, T, E> {
    /// Builder starting from `C::default()`
    pub fn builder() -> PagedIteratorBuilder<C, T, E> {
        PagedIteratorBuilder::default()
    }
}

impl<C, T, E> PagedIterator<C, T, E> {
    pub(crate) fn from_config(config: IteratorConfig<C, T, E>) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The configuration this iterator runs with
    pub fn config(&self) -> &IteratorConfig<C, T, E> {
        &self.config
    }

    /// The termination policy, if an advance function is configured
    pub fn policy(&self) -> Option<TerminationPolicy> {
        self.config.policy()
    }
}

impl<C, T, E> PagedIterator<C, T, E>
where
    C: Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
    E: Send + 'static,
{
    /// Run the loop, handing each item to `handler` in page order
    pub async fn iterate<H>(
        &self,
        ctx: &RunContext,
        handler: &mut H,
    ) -> Result<IterationStats, IterError<E>>
    where
        H: ItemHandler<T, E> + ?Sized,
    {
        self.run(ctx, &mut PerItem(handler)).await
    }

    /// Run the loop, handing each non-empty page to `handler` in one call
    pub async fn iterate_batch<H>(
        &self,
        ctx: &RunContext,
        handler: &mut H,
    ) -> Result<IterationStats, IterError<E>>
    where
        H: PageHandler<T, E> + ?Sized,
    {
        self.run(ctx, &mut WholePage(handler)).await
    }

    /// [`iterate`](Self::iterate) with a plain closure
    pub async fn for_each<F>(
        &self,
        ctx: &RunContext,
        mut f: F,
    ) -> Result<IterationStats, IterError<E>>
    where
        F: FnMut(&T) -> Result<StopResult, E> + Send,
    {
        self.iterate(ctx, &mut f).await
    }

    /// [`iterate_batch`](Self::iterate_batch) with a plain closure
    pub async fn for_each_page<F>(
        &self,
        ctx: &RunContext,
        mut f: F,
    ) -> Result<IterationStats, IterError<E>>
    where
        F: FnMut(&[T]) -> Result<StopResult, E> + Send,
    {
        self.iterate_batch(ctx, &mut f).await
    }

    async fn run<D>(
        &self,
        ctx: &RunContext,
        dispatch: &mut D,
    ) -> Result<IterationStats, IterError<E>>
    where
        D: Dispatch<T, E>,
    {
        let config = &*self.config;
        let Some(fetch) = config.fetch.as_ref() else {
            return Err(IterError::not_configured("fetch_page"));
        };
        let Some(advance) = config.advance.as_ref() else {
            return Err(IterError::not_configured("advance"));
        };
        let terminal = config.terminal.as_ref();
        if matches!(advance, Advance::NextCursor(_)) && terminal.is_none() {
            return Err(IterError::not_configured("terminal_when"));
        }

        let ctx = match config.timeout {
            Some(timeout) => ctx.clone().with_timeout(timeout),
            None => ctx.clone(),
        };

        let mut state = IterationState::new(config.initial_cursor.clone());
        if terminal.is_some_and(|is_terminal| is_terminal(&state.cursor)) {
            debug!("Initial cursor is terminal, nothing to fetch");
            return Ok(state.finish(StopReason::PreCheck));
        }

        debug!("Starting paged iteration");
        loop {
            ctx.check()?;
            if config.max_pages.is_some_and(|max| state.pages_fetched >= max) {
                debug!("Reached page limit after {} pages", state.pages_fetched);
                return Ok(state.finish(StopReason::PageLimit));
            }

            let page: Page<T> = fetch(state.cursor.clone())
                .await
                .map_err(IterError::Fetch)?;
            state.pages_fetched += 1;
            trace!("Page {}: fetched {} items", state.pages_fetched, page.len());

            let dispatched = dispatch.dispatch(&page).await.map_err(IterError::Handler)?;
            state.items_dispatched += dispatched.items;
            if dispatched.control.should_stop() {
                debug!("Handler stopped iteration on page {}", state.pages_fetched);
                return Ok(state.finish(StopReason::Handler));
            }

            let next = match advance {
                Advance::Decision(advance) => {
                    match advance(&page, &state.cursor).map_err(IterError::Advance)? {
                        CursorDecision::Continue(next) => next,
                        CursorDecision::Done => {
                            debug!("Completed paged iteration: {} pages", state.pages_fetched);
                            return Ok(state.finish(StopReason::Decision));
                        }
                    }
                }
                Advance::NextCursor(next_cursor) => {
                    next_cursor(&page).map_err(IterError::Advance)?
                }
            };

            if terminal.is_some_and(|is_terminal| is_terminal(&next)) {
                debug!("Completed paged iteration: {} pages", state.pages_fetched);
                return Ok(state.finish(StopReason::Predicate));
            }
            state.cursor = next;
        }
    }
}
