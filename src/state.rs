use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::ledger::LedgerStore;
use crate::notify::NotificationQueue;
use crate::search::SearchCoordinator;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Mutex<LedgerStore>>,
    pub notices: Arc<Mutex<NotificationQueue>>,
    pub catalog: CatalogClient,
    pub search: Arc<SearchCoordinator>,
}

impl AppState {
    pub fn new(config: &Config, ledger: LedgerStore) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
            notices: Arc::new(Mutex::new(NotificationQueue::new(config.notice_ttl))),
            catalog: CatalogClient::new(config.catalog.clone()),
            search: Arc::new(SearchCoordinator::new(config.search_debounce)),
        }
    }
}
