use crate::config::CatalogConfig;
use crate::errors::CatalogError;
use crate::models::{CatalogExercise, GeneratedWorkout, SuggestedExercise};
use once_cell::sync::Lazy;
use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;
use reqwest::Url;
use tracing::{debug, error};

pub const SEARCH_LIMIT: usize = 10;
pub const MIN_QUERY_LEN: usize = 2;
pub const WORKOUT_SIZE: usize = 5;

static EQUIPMENT_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(barbell|dumbbell|machine|band|smith|weighted|bodyweight|cable|lever)\b")
        .expect("equipment pattern is valid")
});
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Page sections that can generate a workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Upper,
    Lower,
    Cardio,
    Abs,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::Upper, Section::Lower, Section::Cardio, Section::Abs];

    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "upper" => Some(Self::Upper),
            "lower" => Some(Self::Lower),
            "cardio" => Some(Self::Cardio),
            "abs" => Some(Self::Abs),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Cardio => "cardio",
            Self::Abs => "abs",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Upper => "Upper Body",
            Self::Lower => "Lower Body",
            Self::Cardio => "Cardio",
            Self::Abs => "Abs",
        }
    }

    /// Catalog body part for this section. `Lower` picks upper or lower legs
    /// at random on every call.
    pub fn body_part<R: Rng + ?Sized>(self, rng: &mut R) -> &'static str {
        match self {
            Self::Upper => "chest",
            Self::Lower => {
                if rng.gen_bool(0.5) {
                    "upper legs"
                } else {
                    "lower legs"
                }
            }
            Self::Cardio => "cardio",
            Self::Abs => "waist",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: CatalogConfig,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub async fn by_body_part(&self, body_part: &str) -> Vec<CatalogExercise> {
        self.fetch(&["exercises", "bodyPart", body_part])
            .await
            .unwrap_or_else(|err| {
                error!("catalog lookup for {body_part:?} failed: {err}");
                Vec::new()
            })
    }

    pub async fn all(&self) -> Vec<CatalogExercise> {
        self.fetch(&["exercises"]).await.unwrap_or_else(|err| {
            error!("catalog listing failed: {err}");
            Vec::new()
        })
    }

    /// Name search over the full catalog, in catalog order.
    pub async fn search(&self, query: &str) -> Vec<CatalogExercise> {
        if query.trim().chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }
        filter_by_name(self.all().await, query)
    }

    pub async fn generate(&self, section: Section) -> GeneratedWorkout {
        let body_part = section.body_part(&mut rand::thread_rng());
        let exercises = self.by_body_part(body_part).await;
        debug!("catalog returned {} {body_part} exercises", exercises.len());

        let mut rng = rand::thread_rng();
        let exercises = pick_random(exercises, WORKOUT_SIZE, &mut rng)
            .into_iter()
            .map(|exercise| {
                let (sets, reps) = prescription(&mut rng);
                SuggestedExercise {
                    name: clean_exercise_name(&exercise.name),
                    sets,
                    reps,
                }
            })
            .collect();

        GeneratedWorkout {
            section: section.as_str().to_string(),
            body_part: body_part.to_string(),
            exercises,
        }
    }

    async fn fetch(&self, segments: &[&str]) -> Result<Vec<CatalogExercise>, CatalogError> {
        let url = self.endpoint(segments)?;
        let response = self
            .http
            .get(url)
            .header("x-rapidapi-key", self.config.api_key.as_str())
            .header("x-rapidapi-host", self.config.host.as_str())
            .send()
            .await
            .map_err(CatalogError::Transport)?;

        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status()));
        }
        response.json().await.map_err(CatalogError::Parse)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let base = &self.config.base_url;
        let mut url = Url::parse(base).map_err(|err| CatalogError::Url(format!("{base}: {err}")))?;
        url.path_segments_mut()
            .map_err(|()| CatalogError::Url(base.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Case-insensitive substring match on the name, first matches only.
pub fn filter_by_name(exercises: Vec<CatalogExercise>, query: &str) -> Vec<CatalogExercise> {
    let needle = query.trim().to_lowercase();
    exercises
        .into_iter()
        .filter(|exercise| exercise.name.to_lowercase().contains(&needle))
        .take(SEARCH_LIMIT)
        .collect()
}

pub fn clean_exercise_name(raw: &str) -> String {
    let stripped = EQUIPMENT_WORDS.replace_all(raw, "");
    let collapsed = WHITESPACE.replace_all(&stripped, " ");
    capitalize_words(collapsed.trim())
}

pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn pick_random<T, R: Rng + ?Sized>(mut items: Vec<T>, count: usize, rng: &mut R) -> Vec<T> {
    items.shuffle(rng);
    items.truncate(count);
    items
}

/// Suggested volume: 3-4 sets of 8-12 reps.
pub fn prescription<R: Rng + ?Sized>(rng: &mut R) -> (u8, u8) {
    (rng.gen_range(3..=4), rng.gen_range(8..=12))
}
