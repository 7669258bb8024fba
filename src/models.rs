use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub exercise: String,
    pub weight: String,
    pub reps: String,
    pub sets: String,
    pub date: String,
}

/// Logged workouts, newest first. Serialized as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Ledger {
    pub records: Vec<WorkoutRecord>,
}

impl Ledger {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn head(&self) -> Option<&WorkoutRecord> {
        self.records.first()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewWorkout {
    #[serde(default)]
    pub exercise: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub reps: String,
    #[serde(default)]
    pub sets: String,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProgressSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub total_workouts: usize,
    pub streak: u32,
    pub progress: ProgressSeries,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub workouts: Vec<WorkoutRecord>,
    pub stats: StatsResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogExercise {
    pub name: String,
    #[serde(default, rename = "bodyPart")]
    pub body_part: Option<String>,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestedExercise {
    pub name: String,
    pub sets: u8,
    pub reps: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedWorkout {
    pub section: String,
    pub body_part: String,
    pub exercises: Vec<SuggestedExercise>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub superseded: bool,
    pub results: Vec<String>,
}
