use crate::errors::{AppError, LedgerError};
use crate::models::{DashboardView, Ledger, NewWorkout};
use crate::notify::NoticeKind;
use crate::state::AppState;
use crate::stats::build_stats;
use tracing::{info, warn};

/// User actions against the ledger, independent of how they were triggered.
#[derive(Debug, Clone)]
pub enum Command {
    LogWorkout(NewWorkout),
    ClearHistory,
    Refresh,
}

/// Applies a command and returns the re-rendered dashboard. Outcomes the user
/// should see are also posted to the notification queue.
pub async fn dispatch(state: &AppState, command: Command) -> Result<DashboardView, AppError> {
    let mut store = state.ledger.lock().await;
    match command {
        Command::Refresh => Ok(dashboard(store.snapshot())),
        Command::LogWorkout(workout) => match store.append(workout).await {
            Ok(ledger) => {
                let view = dashboard(ledger);
                if let Some(head) = ledger.head() {
                    info!("logged {} on {}", head.exercise, head.date);
                }
                notify(state, NoticeKind::Success, "Workout saved successfully!").await;
                Ok(view)
            }
            Err(err) => {
                warn!("rejected workout: {err}");
                let message = match &err {
                    LedgerError::Validation(message) => message.clone(),
                    LedgerError::Persistence(_) => "Could not save workout.".to_string(),
                };
                notify(state, NoticeKind::Error, message).await;
                Err(err.into())
            }
        },
        Command::ClearHistory => match store.clear().await {
            Ok(ledger) => {
                info!("cleared workout history");
                let view = dashboard(ledger);
                notify(state, NoticeKind::Info, "All workouts cleared.").await;
                Ok(view)
            }
            Err(err) => {
                notify(state, NoticeKind::Error, "Could not clear workouts.").await;
                Err(err.into())
            }
        },
    }
}

pub fn dashboard(ledger: &Ledger) -> DashboardView {
    DashboardView {
        workouts: ledger.records.clone(),
        stats: build_stats(ledger),
    }
}

async fn notify(state: &AppState, kind: NoticeKind, message: impl Into<String>) {
    state.notices.lock().await.push(kind, message);
}
