//! # Paginated Results
//!
//! Backends that return collections hand back a [`PageCursor`].
//! [`PageCollector`] drains one into a single ordered result set.

use crate::error::{BackendError, GatewayError};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// An iterator-like handle over a backend collection that yields pages on demand.
#[async_trait]
pub trait PageCursor: Send {
    type Item: Send;

    /// Whether another page can be fetched.
    fn more(&self) -> bool;

    /// Fetches the next page.
    async fn next_page(&mut self) -> Result<Vec<Self::Item>, BackendError>;
}

/// Drains a [`PageCursor`] into one aggregate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageCollector;

impl PageCollector {
    pub fn new() -> Self {
        Self
    }

    /// Fetches every page and keeps the items `keep` maps to `Some`, in backend order.
    ///
    /// A failed page fetch aborts the drain and the items gathered so far are
    /// dropped; the caller only ever sees the error.
    pub async fn collect<C, U, F>(
        &self,
        cancel: &CancellationToken,
        cursor: &mut C,
        mut keep: F,
    ) -> Result<Vec<U>, GatewayError>
    where
        C: PageCursor + ?Sized,
        F: FnMut(C::Item) -> Option<U> + Send,
        U: Send,
    {
        let mut aggregate = Vec::new();
        let mut pages: u32 = 0;

        while cursor.more() {
            if cancel.is_cancelled() {
                warn!(pages, "Cancelled while paging");
                return Err(GatewayError::Cancelled);
            }

            let page = match cursor.next_page().await {
                Ok(page) => page,
                Err(e) => {
                    warn!(pages, discarded = aggregate.len(), error = %e, "Page fetch failed");
                    return Err(e.into());
                }
            };
            pages += 1;

            let before = aggregate.len();
            aggregate.extend(page.into_iter().filter_map(&mut keep));
            debug!(pages, kept = aggregate.len() - before, "Page fetched");
        }

        debug!(pages, total = aggregate.len(), "Cursor drained");
        Ok(aggregate)
    }
}
