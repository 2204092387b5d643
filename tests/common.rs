#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use uniportal::{
    api::ApiClient,
    model::entity::UserProfile,
    session::Session,
};
use url::Url;

pub const TOKEN: &str = "test-token";
pub const EMAIL: &str = "ada@uni.edu";
pub const PASSWORD: &str = "secret";

type Reply = (StatusCode, Json<Value>);

/// In-memory stand-in for the UniPortal backend, counting requests per route.
#[derive(Clone, Default)]
pub struct MockBackend {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    hits: HashMap<&'static str, usize>,
    queries: HashMap<&'static str, HashMap<String, String>>,
    bodies: HashMap<&'static str, Value>,
    enrolled: Vec<(String, String)>,
    progress: HashMap<(String, String), u8>,
    failing_courses: usize,
    enrolled_failure: Option<String>,
    raw_enrolled: Option<Value>,
    raw_courses: Option<Value>,
    delay: Option<Duration>,
}

impl MockBackend {
    pub fn hits(&self, route: &str) -> usize {
        self.state().hits.get(route).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.state().hits.values().sum()
    }

    pub fn query(&self, route: &str) -> HashMap<String, String> {
        self.state().queries.get(route).cloned().unwrap_or_default()
    }

    pub fn body(&self, route: &str) -> Value {
        self.state().bodies.get(route).cloned().unwrap_or(Value::Null)
    }

    pub fn enrolled(&self) -> Vec<(String, String)> {
        self.state().enrolled.clone()
    }

    pub fn enroll(&self, course_id: &str, module_id: &str) {
        self.state()
            .enrolled
            .push((course_id.to_string(), module_id.to_string()));
    }

    pub fn set_progress(&self, course_id: &str, module_id: &str, progress: u8) {
        self.state()
            .progress
            .insert((course_id.to_string(), module_id.to_string()), progress);
    }

    /// The next `n` course list requests answer `success: false`.
    pub fn fail_courses(&self, n: usize) {
        self.state().failing_courses = n;
    }

    pub fn fail_enrolled_modules(&self, message: &str) {
        self.state().enrolled_failure = Some(message.to_string());
    }

    /// Answers the enrolled modules list with `modules` as given, bypassing the stored state.
    pub fn serve_enrolled_modules(&self, modules: Value) {
        self.state().raw_enrolled = Some(modules);
    }

    /// Answers the course list with `courses` as given, ignoring filters.
    pub fn serve_courses(&self, courses: Value) {
        self.state().raw_courses = Some(courses);
    }

    /// Every read endpoint sleeps this long before answering.
    pub fn set_delay(&self, delay: Duration) {
        self.state().delay = Some(delay);
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.inner.lock().expect("mock state poisoned")
    }

    fn hit(&self, route: &'static str) {
        *self.state().hits.entry(route).or_default() += 1;
    }

    async fn pause(&self) {
        let delay = self.state().delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    pub fn router(&self) -> Router {
        let api = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/register", post(register))
            .route("/auth/logout", post(logout))
            .route("/courses", get(list_courses))
            .route("/courses/{course_id}", get(get_course))
            .route("/courses/{course_id}/modules", get(list_course_modules))
            .route("/courses/{course_id}/modules/{module_id}", get(get_module))
            .route("/modules/{module_id}/enroll", post(enroll).delete(drop_module))
            .route("/user/enrolled-modules", get(enrolled_modules))
            .route("/user/progress", get(get_progress).put(update_progress));

        Router::new().nest("/api", api).with_state(self.clone())
    }
}

fn ok(body: Value) -> Reply {
    (StatusCode::OK, Json(body))
}

fn fail(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "success": false, "message": message })))
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

fn unauthorized() -> Reply {
    fail(StatusCode::UNAUTHORIZED, "Unauthorized")
}

fn catalogue() -> Vec<Value> {
    vec![
        json!({"id": "c1", "title": "Rust Fundamentals", "description": "Ownership and borrowing",
               "instructor": "Ferris", "duration": "8 weeks", "students": 120,
               "level": "Beginner", "modules": 2}),
        json!({"id": "c2", "title": "Systems Design", "description": "Scaling services",
               "instructor": "Grace", "duration": "6 weeks", "students": 80,
               "level": "Intermediate", "modules": 4}),
        json!({"id": "c3", "title": "Compilers", "description": "From tokens to code",
               "instructor": "Niklaus", "duration": "12 weeks", "students": 35,
               "level": "Advanced", "modules": 9}),
    ]
}

fn module_title(module_id: &str) -> &'static str {
    match module_id {
        "m1" => "Ownership",
        "m2" => "Lifetimes",
        _ => "Unknown module",
    }
}

async fn login(State(b): State<MockBackend>, Json(body): Json<Value>) -> Reply {
    b.hit("login");
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        ok(json!({"success": true, "token": TOKEN,
                  "user": {"name": "Ada Lovelace", "email": EMAIL, "studentId": "S-1"}}))
    } else {
        fail(StatusCode::UNAUTHORIZED, "Invalid credentials")
    }
}

async fn register(State(b): State<MockBackend>, Json(body): Json<Value>) -> Reply {
    b.hit("register");
    b.state().bodies.insert("register", body.clone());
    if body["email"] == EMAIL {
        return fail(StatusCode::CONFLICT, "Email already registered");
    }

    let name = format!(
        "{} {}",
        body["firstName"].as_str().unwrap_or_default(),
        body["lastName"].as_str().unwrap_or_default()
    );
    ok(json!({"success": true, "token": TOKEN, "user": {"name": name, "email": body["email"]}}))
}

async fn logout(State(b): State<MockBackend>, headers: HeaderMap) -> Reply {
    b.hit("logout");
    if !authorized(&headers) {
        return unauthorized();
    }
    ok(json!({"success": true}))
}

async fn list_courses(
    State(b): State<MockBackend>,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    b.hit("courses");
    b.state().queries.insert("courses", query.clone());
    b.pause().await;

    {
        let mut state = b.state();
        if state.failing_courses > 0 {
            state.failing_courses -= 1;
            return fail(StatusCode::INTERNAL_SERVER_ERROR, "Catalogue unavailable");
        }
        if let Some(courses) = &state.raw_courses {
            return ok(json!({"success": true, "courses": courses}));
        }
    }

    let courses: Vec<Value> = catalogue()
        .into_iter()
        .filter(|c| query.get("level").is_none_or(|level| c["level"] == level.as_str()))
        .filter(|c| {
            query.get("search").is_none_or(|search| {
                c["title"]
                    .as_str()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(&search.to_lowercase())
            })
        })
        .collect();

    ok(json!({"success": true, "courses": courses}))
}

async fn get_course(State(b): State<MockBackend>, Path(course_id): Path<String>) -> Reply {
    b.hit("course");
    b.pause().await;
    if course_id != "c1" {
        return fail(StatusCode::NOT_FOUND, "Course not found");
    }

    ok(json!({"success": true, "course": {
        "id": "c1", "title": "Rust Fundamentals", "description": "Ownership and borrowing",
        "instructor": "Ferris", "duration": "8 weeks", "students": 120, "level": "Beginner",
        "modules": [
            {"id": "m2", "title": "Lifetimes", "description": "Borrow checker deep dive",
             "duration": "2 weeks", "order": 2, "isLocked": true},
            {"id": "m1", "title": "Ownership", "description": "Moves and copies",
             "duration": "1 week", "order": 1, "isLocked": false}
        ]
    }}))
}

async fn list_course_modules(State(b): State<MockBackend>, Path(course_id): Path<String>) -> Reply {
    b.hit("course_modules");
    if course_id != "c1" {
        return fail(StatusCode::NOT_FOUND, "Course not found");
    }

    ok(json!({"success": true, "modules": [
        {"id": "m2", "title": "Lifetimes", "order": 2, "isLocked": true},
        {"id": "m1", "title": "Ownership", "order": 1}
    ]}))
}

async fn get_module(
    State(b): State<MockBackend>,
    Path((course_id, module_id)): Path<(String, String)>,
) -> Reply {
    b.hit("module");
    b.pause().await;
    if course_id != "c1" || module_id != "m1" {
        return fail(StatusCode::NOT_FOUND, "Module not found");
    }

    ok(json!({"success": true, "module": {
        "id": "m1", "courseId": "c1", "title": "Ownership",
        "description": "Moves and copies", "duration": "1 week",
        "content": "Every value has a single owner.",
        "objectives": ["Explain moves", "Use references"],
        "prerequisites": "None", "difficulty": "Beginner",
        "resources": [{"type": "video", "title": "Intro", "url": "http://videos.example/ownership"}]
    }}))
}

async fn enroll(
    State(b): State<MockBackend>,
    headers: HeaderMap,
    Path(module_id): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    b.hit("enroll");
    b.state().bodies.insert("enroll", body.clone());
    if !authorized(&headers) {
        return unauthorized();
    }

    let Some(course_id) = body["courseId"].as_str() else {
        return fail(StatusCode::BAD_REQUEST, "courseId is required");
    };

    let mut state = b.state();
    let key = (course_id.to_string(), module_id);
    if state.enrolled.contains(&key) {
        return fail(StatusCode::CONFLICT, "Already enrolled in this module");
    }
    state.enrolled.push(key);
    ok(json!({"success": true, "message": "Enrolled"}))
}

async fn drop_module(
    State(b): State<MockBackend>,
    headers: HeaderMap,
    Path(module_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    b.hit("drop");
    b.state().queries.insert("drop", query.clone());
    if !authorized(&headers) {
        return unauthorized();
    }

    let Some(course_id) = query.get("courseId") else {
        return fail(StatusCode::BAD_REQUEST, "courseId is required");
    };

    let mut state = b.state();
    let before = state.enrolled.len();
    state
        .enrolled
        .retain(|(c, m)| !(c == course_id && *m == module_id));

    if state.enrolled.len() == before {
        return fail(StatusCode::NOT_FOUND, "Not enrolled in this module");
    }
    ok(json!({"success": true}))
}

async fn enrolled_modules(State(b): State<MockBackend>, headers: HeaderMap) -> Reply {
    b.hit("enrolled");
    b.pause().await;
    if !authorized(&headers) {
        return unauthorized();
    }

    let state = b.state();
    if let Some(message) = &state.enrolled_failure {
        return fail(StatusCode::INTERNAL_SERVER_ERROR, message);
    }
    if let Some(modules) = &state.raw_enrolled {
        return ok(json!({"success": true, "modules": modules}));
    }

    let modules: Vec<Value> = state
        .enrolled
        .iter()
        .map(|(course_id, module_id)| {
            let progress = state
                .progress
                .get(&(course_id.clone(), module_id.clone()))
                .copied()
                .unwrap_or(0);
            let status = if progress >= 100 { "completed" } else { "in-progress" };

            json!({
                "id": format!("{course_id}-{module_id}"),
                "courseId": course_id,
                "courseTitle": "Rust Fundamentals",
                "moduleTitle": module_title(module_id),
                "progress": progress,
                "enrolledDate": "2024-01-15",
                "dueDate": "2024-03-01T00:00:00Z",
                "status": status,
                "instructor": "Ferris",
                "duration": "1 week",
            })
        })
        .collect();

    ok(json!({"success": true, "modules": modules}))
}

async fn get_progress(
    State(b): State<MockBackend>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    b.hit("progress_get");
    b.state().queries.insert("progress_get", query.clone());
    if !authorized(&headers) {
        return unauthorized();
    }

    let key = (
        query.get("courseId").cloned().unwrap_or_default(),
        query.get("moduleId").cloned().unwrap_or_default(),
    );
    let progress = b.state().progress.get(&key).copied().unwrap_or(0);
    ok(json!({"success": true, "progress": progress}))
}

async fn update_progress(
    State(b): State<MockBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    b.hit("progress_put");
    b.state().bodies.insert("progress_put", body.clone());
    if !authorized(&headers) {
        return unauthorized();
    }

    let (Some(course_id), Some(module_id), Some(progress)) = (
        body["courseId"].as_str(),
        body["moduleId"].as_str(),
        body["progress"].as_u64(),
    ) else {
        return fail(StatusCode::BAD_REQUEST, "courseId, moduleId and progress are required");
    };

    b.set_progress(course_id, module_id, progress.min(100) as u8);
    ok(json!({"success": true}))
}

/// Boots the mock backend on an ephemeral port and returns a client pointed at it.
pub async fn setup_server() -> (MockBackend, ApiClient) {
    let backend = MockBackend::default();
    let app = backend.router();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let base = Url::parse(&format!("http://{addr}/api")).unwrap();
    (backend, ApiClient::new(base).unwrap())
}

/// Client whose base url points at a port nobody listens on.
pub async fn unreachable_client() -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    ApiClient::new(Url::parse(&format!("http://{addr}/api")).unwrap()).unwrap()
}

pub fn session() -> Session {
    Session::new(TOKEN, UserProfile::new("Ada Lovelace", EMAIL))
}

pub fn stale_session() -> Session {
    Session::new("expired", UserProfile::new("Ada Lovelace", EMAIL))
}
