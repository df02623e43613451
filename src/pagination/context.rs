//! Cancellation and deadlines for a run

use crate::error::IterError;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// External stop signal for one `iterate` call
///
/// Only consulted between pages. A fetch or handler call that is already
/// running is never interrupted.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    token: Option<CancellationToken>,
    deadline: Option<Instant>,
}

impl RunContext {
    /// A context that never cancels
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort at the next page boundary once `token` is cancelled
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Abort at the next page boundary once `deadline` has passed
    ///
    /// If a deadline is already set, the earlier one wins.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    /// Deadline `timeout` from now
    ///
    /// A timeout too large to represent as an instant sets no deadline.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// The effective deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The cancellation token, if any
    pub fn token(&self) -> Option<&CancellationToken> {
        self.token.as_ref()
    }

    /// Whether the token has fired
    pub fn is_cancelled(&self) -> bool {
        self.token.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    /// Whether the deadline has passed
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    pub(crate) fn check<E>(&self) -> Result<(), IterError<E>> {
        if self.is_cancelled() {
            return Err(IterError::Cancelled);
        }
        if self.is_expired() {
            return Err(IterError::DeadlineExceeded);
        }
        Ok(())
    }
}
