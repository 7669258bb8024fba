use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::get};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct WorkoutRecord {
    exercise: String,
    weight: String,
    reps: String,
    sets: String,
    date: String,
}

#[derive(Debug, Deserialize)]
struct ProgressSeries {
    labels: Vec<String>,
    values: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct Stats {
    total_workouts: usize,
    streak: u32,
    progress: ProgressSeries,
}

#[derive(Debug, Deserialize)]
struct DashboardView {
    workouts: Vec<WorkoutRecord>,
    stats: Stats,
}

#[derive(Debug, Deserialize)]
struct Notice {
    message: String,
    kind: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    superseded: bool,
    results: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Suggested {
    name: String,
    sets: u8,
    reps: u8,
}

#[derive(Debug, Deserialize)]
struct GeneratedWorkout {
    section: String,
    body_part: String,
    exercises: Vec<Suggested>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

/// Stand-in for the exercise catalog, served from its own thread so it
/// outlives any single test runtime.
static CATALOG_URL: Lazy<String> = Lazy::new(|| {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind catalog port");
    let addr = listener.local_addr().unwrap();
    listener.set_nonblocking(true).unwrap();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("catalog runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            let app = Router::new()
                .route("/exercises", get(all_exercises))
                .route("/exercises/bodyPart/:part", get(by_body_part));
            axum::serve(listener, app).await.unwrap();
        });
    });
    format!("http://{addr}")
});

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("x-rapidapi-key").and_then(|v| v.to_str().ok()) == Some("test-key")
        && headers.get("x-rapidapi-host").and_then(|v| v.to_str().ok()) == Some("catalog.test")
}

async fn all_exercises(headers: HeaderMap) -> Result<Json<serde_json::Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let mut entries = vec![
        serde_json::json!({ "name": "push up" }),
        serde_json::json!({ "name": "pull up" }),
        serde_json::json!({ "name": "squat" }),
    ];
    entries.extend((0..20).map(|i| serde_json::json!({ "name": format!("sit up {i}") })));
    Ok(Json(serde_json::Value::Array(entries)))
}

async fn by_body_part(
    headers: HeaderMap,
    axum::extract::Path(part): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let entries: Vec<_> = (0..12)
        .map(|i| serde_json::json!({ "name": format!("cable {part} drill {i}"), "bodyPart": part }))
        .collect();
    Ok(Json(serde_json::Value::Array(entries)))
}

#[cfg(unix)]
mod cleanup {
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("reptrack_http_{}_{}", std::process::id(), nanos));
    path.push("workouts.json");
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/workouts")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_reptrack"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", unique_data_path())
        .env("CATALOG_BASE_URL", CATALOG_URL.as_str())
        .env("CATALOG_HOST", "catalog.test")
        .env("RAPIDAPI_KEY", "test-key")
        .env("SEARCH_DEBOUNCE_MS", "50")
        .env("NOTICE_TTL_MS", "60000")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn reset(client: &Client, base_url: &str) {
    let cleared: DashboardView = client
        .delete(format!("{base_url}/api/workouts"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(cleared.workouts.is_empty());
    let _: Vec<Notice> = client
        .get(format!("{base_url}/api/notifications"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
}

async fn log_workout(client: &Client, base_url: &str, body: serde_json::Value) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/workouts"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_logged_workouts_drive_streak_and_progress() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server.base_url).await;

    for (date, weight) in [("2024-01-01", "90"), ("2024-01-02", "95"), ("2024-01-03", "100")] {
        let response = log_workout(
            &client,
            &server.base_url,
            serde_json::json!({ "exercise": "Bench Press", "weight": weight, "reps": "8", "sets": "3", "date": date }),
        )
        .await;
        assert!(response.status().is_success());
    }

    let view: DashboardView = client
        .get(format!("{}/api/workouts", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view.workouts.len(), 3);
    assert_eq!(view.workouts[0].date, "2024-01-03");
    assert_eq!(view.workouts[0].exercise, "Bench Press");
    assert_eq!(view.workouts[0].reps, "8");
    assert_eq!(view.workouts[0].sets, "3");
    assert_eq!(view.workouts[2].weight, "90");
    assert_eq!(view.stats.streak, 3);
    assert_eq!(view.stats.total_workouts, 3);
    assert_eq!(view.stats.progress.labels, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    assert_eq!(view.stats.progress.values, vec![Some(90.0), Some(95.0), Some(100.0)]);

    let response = log_workout(
        &client,
        &server.base_url,
        serde_json::json!({ "exercise": "Bench Press", "weight": "heavy", "reps": "8", "sets": "3", "date": "2024-01-10" }),
    )
    .await;
    let view: DashboardView = response.json().await.unwrap();
    assert_eq!(view.stats.streak, 1);
    assert_eq!(view.stats.progress.values.last(), Some(&None));

    let stats: Stats = client
        .get(format!("{}/api/stats", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats.total_workouts, 4);
    assert_eq!(stats.progress.labels.last().map(String::as_str), Some("2024-01-10"));
    assert_eq!(
        stats.progress.values,
        vec![Some(90.0), Some(95.0), Some(100.0), None]
    );

    let notices: Vec<Notice> = client
        .get(format!("{}/api/notifications", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(notices.len(), 4);
    assert!(notices.iter().all(|notice| notice.kind == "success"));
}

#[tokio::test]
async fn http_missing_field_is_rejected_with_message() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server.base_url).await;

    let response = log_workout(
        &client,
        &server.base_url,
        serde_json::json!({ "exercise": "Row", "weight": "", "reps": "10", "sets": "3" }),
    )
    .await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Please fill in all fields.");

    let notices: Vec<Notice> = client
        .get(format!("{}/api/notifications", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, "error");
    assert_eq!(notices[0].message, "Please fill in all fields.");

    let stats: Stats = client
        .get(format!("{}/api/stats", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats.total_workouts, 0);
    assert_eq!(stats.streak, 0);
}

#[tokio::test]
async fn http_form_submission_and_clear_render_the_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    reset(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/workouts/add", server.base_url))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("exercise=Goblet+Squat&weight=50&reps=12&sets=3")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_redirection());

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Goblet Squat"));
    assert!(page.contains("Workout saved successfully!"));

    let response = client
        .post(format!("{}/workouts/clear", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_redirection());

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("No workouts yet"));
}

#[tokio::test]
async fn http_search_filters_catalog_names() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let found: SearchResponse = client
        .get(format!("{}/api/search", server.base_url))
        .query(&[("q", "up")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!found.superseded);
    assert_eq!(found.results.len(), 10);
    assert_eq!(found.results[0], "Push Up");
    assert_eq!(found.results[1], "Pull Up");
    assert_eq!(found.results[2], "Sit Up 0");

    let short: SearchResponse = client
        .get(format!("{}/api/search", server.base_url))
        .query(&[("q", "u")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(short.results.is_empty());
}

#[tokio::test]
async fn http_generate_returns_five_clean_suggestions() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let workout: GeneratedWorkout = client
        .get(format!("{}/api/generate/lower", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(workout.section, "lower");
    assert!(workout.body_part == "upper legs" || workout.body_part == "lower legs");
    assert_eq!(workout.exercises.len(), 5);
    for exercise in &workout.exercises {
        assert!(!exercise.name.to_lowercase().contains("cable"));
        assert!(exercise.name.contains("Legs Drill"), "{}", exercise.name);
        assert!((3..=4).contains(&exercise.sets));
        assert!((8..=12).contains(&exercise.reps));
    }
}
