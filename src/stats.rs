use crate::ledger::parse_date;
use crate::models::{Ledger, ProgressSeries, StatsResponse};
use std::collections::BTreeSet;
use tracing::warn;

pub fn build_stats(ledger: &Ledger) -> StatsResponse {
    StatsResponse {
        total_workouts: ledger.len(),
        streak: current_streak(ledger),
        progress: progress_series(ledger),
    }
}

/// Consecutive-day run ending at the latest logged date. A gap resets the
/// count to 1 even if an earlier run was longer.
pub fn current_streak(ledger: &Ledger) -> u32 {
    if ledger.is_empty() {
        return 0;
    }

    let distinct: BTreeSet<&str> = ledger
        .records
        .iter()
        .map(|record| record.date.as_str())
        .collect();

    let mut dates: Vec<_> = distinct
        .into_iter()
        .filter_map(|raw| {
            let parsed = parse_date(raw);
            if parsed.is_none() {
                warn!("skipping unparseable workout date {raw:?}");
            }
            parsed
        })
        .collect();
    dates.sort_unstable();

    let mut streak = 1;
    for pair in dates.windows(2) {
        let gap = (pair[1] - pair[0]).num_days();
        if gap == 1 {
            streak += 1;
        } else if gap > 1 {
            streak = 1;
        }
    }
    streak
}

/// Oldest-first `(date, weight)` points. Weights that do not parse are kept
/// as NaN for the chart to skip.
pub fn progress_series(ledger: &Ledger) -> ProgressSeries {
    let mut series = ProgressSeries {
        labels: Vec::with_capacity(ledger.len()),
        values: Vec::with_capacity(ledger.len()),
    };
    for record in ledger.records.iter().rev() {
        series.labels.push(record.date.clone());
        series.values.push(record.weight.trim().parse().unwrap_or(f64::NAN));
    }
    series
}
