pub mod app;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod notify;
pub mod search;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use ledger::LedgerStore;
pub use state::AppState;
