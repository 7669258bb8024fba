use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<T> {
    Completed(T),
    /// A newer query started before this one finished.
    Superseded,
}

/// Debounces live search and lets only the most recent query deliver.
#[derive(Debug)]
pub struct SearchCoordinator {
    quiet_period: Duration,
    latest: AtomicU64,
}

impl SearchCoordinator {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            latest: AtomicU64::new(0),
        }
    }

    /// Marks every outstanding query stale, e.g. when the box is cleared.
    pub fn invalidate(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub async fn run<F, Fut, T>(&self, fetch: F) -> SearchOutcome<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let ticket = self.invalidate();

        tokio::time::sleep(self.quiet_period).await;
        if !self.is_current(ticket) {
            debug!("search #{ticket} superseded while debouncing");
            return SearchOutcome::Superseded;
        }

        let result = fetch().await;
        if !self.is_current(ticket) {
            debug!("search #{ticket} superseded while in flight");
            return SearchOutcome::Superseded;
        }
        SearchOutcome::Completed(result)
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}
