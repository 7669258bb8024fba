use crate::errors::LedgerError;
use crate::models::{Ledger, NewWorkout, WorkoutRecord};
use crate::storage::{load_ledger, persist_ledger, remove_ledger};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use tracing::info;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
const MISSING_FIELDS: &str = "Please fill in all fields.";

/// In-memory mirror of the persisted workouts slot. Every mutation rewrites
/// the whole slot before the new snapshot becomes visible.
#[derive(Debug)]
pub struct LedgerStore {
    path: PathBuf,
    ledger: Ledger,
}

impl LedgerStore {
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ledger = load_ledger(&path).await;
        info!("loaded {} workouts from {}", ledger.len(), path.display());
        Self { path, ledger }
    }

    pub fn snapshot(&self) -> &Ledger {
        &self.ledger
    }

    pub async fn append(&mut self, workout: NewWorkout) -> Result<&Ledger, LedgerError> {
        let record = validate(workout, today)?;

        let mut next = self.ledger.clone();
        next.records.insert(0, record);
        persist_ledger(&self.path, &next).await?;

        self.ledger = next;
        Ok(&self.ledger)
    }

    pub async fn clear(&mut self) -> Result<&Ledger, LedgerError> {
        remove_ledger(&self.path).await?;
        self.ledger = Ledger::default();
        Ok(&self.ledger)
    }
}

/// Current calendar date in the host's local timezone.
pub fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

fn validate(workout: NewWorkout, today: impl FnOnce() -> String) -> Result<WorkoutRecord, LedgerError> {
    let exercise = workout.exercise.trim();
    let weight = workout.weight.trim();
    let reps = workout.reps.trim();
    let sets = workout.sets.trim();
    if exercise.is_empty() || weight.is_empty() || reps.is_empty() || sets.is_empty() {
        return Err(LedgerError::Validation(MISSING_FIELDS.to_string()));
    }

    let date = match workout.date.as_deref().map(str::trim) {
        None | Some("") => today(),
        Some(date) => match parse_date(date) {
            Some(parsed) => parsed.format(DATE_FORMAT).to_string(),
            None => {
                return Err(LedgerError::Validation(format!(
                    "Invalid date {date:?}, expected YYYY-MM-DD."
                )));
            }
        },
    };

    Ok(WorkoutRecord {
        exercise: exercise.to_string(),
        weight: weight.to_string(),
        reps: reps.to_string(),
        sets: sets.to_string(),
        date,
    })
}
