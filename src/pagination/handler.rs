//! Item and page handlers
//!
//! Handlers are supplied per run. Synchronous closures implement both traits
//! through blanket impls; anything that needs to await should implement the
//! trait on its own type.

use super::types::StopResult;
use async_trait::async_trait;

/// Consumes one item at a time
#[async_trait]
pub trait ItemHandler<T: Sync, E: Send>: Send {
    /// Handle a single item; return [`StopResult::Stop`] to end the run early
    async fn handle(&mut self, item: &T) -> Result<StopResult, E>;
}

#[async_trait]
impl<T, E, F> ItemHandler<T, E> for F
where
    T: Sync + 'static,
    E: Send + 'static,
    F: FnMut(&T) -> Result<StopResult, E> + Send,
{
    async fn handle(&mut self, item: &T) -> Result<StopResult, E> {
        (self)(item)
    }
}

/// Consumes a whole page per call
#[async_trait]
pub trait PageHandler<T: Sync, E: Send>: Send {
    /// Handle a non-empty page; return [`StopResult::Stop`] to end the run early
    async fn handle_page(&mut self, page: &[T]) -> Result<StopResult, E>;
}

#[async_trait]
impl<T, E, F> PageHandler<T, E> for F
where
    T: Sync + 'static,
    E: Send + 'static,
    F: FnMut(&[T]) -> Result<StopResult, E> + Send,
{
    async fn handle_page(&mut self, page: &[T]) -> Result<StopResult, E> {
        (self)(page)
    }
}

/// Result of dispatching one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Dispatched {
    pub(crate) items: u64,
    pub(crate) control: StopResult,
}

/// Adapts either handler shape to the loop
#[async_trait]
pub(crate) trait Dispatch<T: Sync, E: Send>: Send {
    async fn dispatch(&mut self, page: &[T]) -> Result<Dispatched, E>;
}

pub(crate) struct PerItem<'h, H: ?Sized>(pub(crate) &'h mut H);

pub(crate) struct WholePage<'h, H: ?Sized>(pub(crate) &'h mut H);

#[async_trait]
impl<'h, T, E, H> Dispatch<T, E> for PerItem<'h, H>
where
    T: Sync + 'static,
    E: Send + 'static,
    H: ItemHandler<T, E> + ?Sized,
{
    async fn dispatch(&mut self, page: &[T]) -> Result<Dispatched, E> {
        let mut items = 0;
        for item in page {
            let control = self.0.handle(item).await?;
            items += 1;
            if control.should_stop() {
                return Ok(Dispatched { items, control });
            }
        }
        Ok(Dispatched {
            items,
            control: StopResult::Continue,
        })
    }
}

#[async_trait]
impl<'h, T, E, H> Dispatch<T, E> for WholePage<'h, H>
where
    T: Sync + 'static,
    E: Send + 'static,
    H: PageHandler<T, E> + ?Sized,
{
    async fn dispatch(&mut self, page: &[T]) -> Result<Dispatched, E> {
        if page.is_empty() {
            return Ok(Dispatched {
                items: 0,
                control: StopResult::Continue,
            });
        }
        let control = self.0.handle_page(page).await?;
        Ok(Dispatched {
            items: page.len() as u64,
            control,
        })
    }
}
