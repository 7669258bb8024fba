use crate::catalog::{MIN_QUERY_LEN, Section, capitalize_words};
use crate::commands::{Command, dashboard, dispatch};
use crate::errors::AppError;
use crate::models::{
    DashboardView, GeneratedWorkout, NewWorkout, SearchParams, SearchResponse, StatsResponse,
};
use crate::notify::NoticeView;
use crate::search::SearchOutcome;
use crate::state::AppState;
use crate::stats::build_stats;
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use tracing::warn;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let view = {
        let store = state.ledger.lock().await;
        dashboard(store.snapshot())
    };
    let notices = state.notices.lock().await.take_active();
    Html(render_index(&view, &notices))
}

pub async fn get_workouts(State(state): State<AppState>) -> Result<Json<DashboardView>, AppError> {
    Ok(Json(dispatch(&state, Command::Refresh).await?))
}

pub async fn add_workout(
    State(state): State<AppState>,
    Json(payload): Json<NewWorkout>,
) -> Result<Json<DashboardView>, AppError> {
    Ok(Json(dispatch(&state, Command::LogWorkout(payload)).await?))
}

pub async fn clear_workouts(State(state): State<AppState>) -> Result<Json<DashboardView>, AppError> {
    Ok(Json(dispatch(&state, Command::ClearHistory).await?))
}

/// Plain form post. Validation failures come back as a notice on the page.
pub async fn form_add(
    State(state): State<AppState>,
    Form(payload): Form<NewWorkout>,
) -> Result<Redirect, AppError> {
    match dispatch(&state, Command::LogWorkout(payload)).await {
        Ok(_) => Ok(Redirect::to("/")),
        Err(err) if err.status.is_client_error() => Ok(Redirect::to("/")),
        Err(err) => Err(err),
    }
}

pub async fn form_clear(State(state): State<AppState>) -> Result<Redirect, AppError> {
    dispatch(&state, Command::ClearHistory).await?;
    Ok(Redirect::to("/"))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let store = state.ledger.lock().await;
    Ok(Json(build_stats(store.snapshot())))
}

pub async fn get_notifications(State(state): State<AppState>) -> Json<Vec<NoticeView>> {
    Json(state.notices.lock().await.take_active())
}

pub async fn generate(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Json<GeneratedWorkout> {
    let section = Section::parse(&section).unwrap_or_else(|| {
        warn!("unknown section {section:?}, generating {}", Section::default().as_str());
        Section::default()
    });
    Json(state.catalog.generate(section).await)
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let query = params.q.trim().to_string();
    if query.chars().count() < MIN_QUERY_LEN {
        state.search.invalidate();
        return Json(SearchResponse {
            query,
            superseded: false,
            results: Vec::new(),
        });
    }

    let catalog = state.catalog.clone();
    let needle = query.clone();
    let outcome = state
        .search
        .run(move || async move { catalog.search(&needle).await })
        .await;
    let response = match outcome {
        SearchOutcome::Completed(found) => SearchResponse {
            results: found.iter().map(|exercise| capitalize_words(&exercise.name)).collect(),
            superseded: false,
            query,
        },
        SearchOutcome::Superseded => SearchResponse {
            query,
            superseded: true,
            results: Vec::new(),
        },
    };
    Json(response)
}
