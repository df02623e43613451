//! Ready-made advance functions and terminal predicates
//!
//! Each helper returns a closure that plugs straight into
//! [`PagedIteratorBuilder::advance`](super::PagedIteratorBuilder::advance) or
//! [`PagedIteratorBuilder::terminal_when`](super::PagedIteratorBuilder::terminal_when).

use super::types::{CursorDecision, Page};

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset/limit pagination (e.g., SQL-style `OFFSET n LIMIT m`)
///
/// The cursor is the number of items already consumed. A page shorter than
/// `limit` is the last one. An empty page is always the last one.
pub fn offset<T, E>(
    limit: u64,
) -> impl Fn(&Page<T>, &u64) -> Result<CursorDecision<u64>, E> + Send + Sync + 'static {
    move |page, cursor| {
        let len = page.len() as u64;
        if len == 0 || len < limit {
            return Ok(CursorDecision::Done);
        }
        Ok(CursorDecision::Continue(cursor + len))
    }
}

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination: the cursor is the page index
///
/// Stops on the first empty page.
pub fn page_number<T, E>(
) -> impl Fn(&Page<T>, &u64) -> Result<CursorDecision<u64>, E> + Send + Sync + 'static {
    |page, cursor| {
        if page.is_empty() {
            Ok(CursorDecision::Done)
        } else {
            Ok(CursorDecision::Continue(cursor + 1))
        }
    }
}

// ============================================================================
// Keyset Pagination
// ============================================================================

/// Keyset pagination: the next cursor is the key of the last item
///
/// Stops on the first empty page.
pub fn last_item<T, C, E, K>(
    key: K,
) -> impl Fn(&Page<T>, &C) -> Result<CursorDecision<C>, E> + Send + Sync + 'static
where
    K: Fn(&T) -> C + Send + Sync + 'static,
{
    move |page, _cursor| match page.last() {
        Some(item) => Ok(CursorDecision::Continue(key(item))),
        None => Ok(CursorDecision::Done),
    }
}

/// Like [`last_item`], for the predicate policy: yields the last key or `empty`
pub fn last_item_or<T, C, E, K>(
    key: K,
    empty: C,
) -> impl Fn(&Page<T>) -> Result<C, E> + Send + Sync + 'static
where
    C: Clone + Send + Sync + 'static,
    K: Fn(&T) -> C + Send + Sync + 'static,
{
    move |page| Ok(page.last().map_or_else(|| empty.clone(), &key))
}

// ============================================================================
// Terminal Predicates
// ============================================================================

/// Terminal once the cursor reaches `end`
pub fn until<C>(end: C) -> impl Fn(&C) -> bool + Send + Sync + 'static
where
    C: PartialOrd + Send + Sync + 'static,
{
    move |cursor| *cursor >= end
}

/// Terminal when the cursor equals its type's default (`0`, `""`, ...)
///
/// A legitimate cursor that happens to be the default value is treated as
/// the end too, so this is opt-in rather than the predicate policy's default.
pub fn is_default_cursor<C>(cursor: &C) -> bool
where
    C: Default + PartialEq,
{
    *cursor == C::default()
}
