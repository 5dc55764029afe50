//! In-process stand-in for the hosted backend: just enough of the auth
//! endpoints and the `travel_logs` table to drive the app end to end.
#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use once_cell::sync::Lazy;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// E-mails on this domain get the "confirm your address" sign-up answer.
pub const CONFIRM_DOMAIN: &str = "@confirm.test";

#[derive(Debug, Clone)]
struct MockUser {
    id: String,
    email: String,
    password: String,
    metadata: Value,
}

impl MockUser {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "aud": "authenticated",
            "email": self.email,
            "user_metadata": self.metadata,
        })
    }
}

#[derive(Default)]
pub struct MockState {
    users: Mutex<HashMap<String, MockUser>>,
    tokens: Mutex<HashMap<String, String>>,
    rows: Mutex<Vec<Value>>,
    next_id: AtomicU64,
    pub recover_requests: Mutex<Vec<String>>,
}

impl MockState {
    fn next(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Makes every later request carrying `token` fail with 401.
    pub fn revoke(&self, token: &str) {
        self.tokens.lock().unwrap().remove(token);
    }

    /// Revokes every token issued to `email`.
    pub fn revoke_user(&self, email: &str) {
        let users = self.users.lock().unwrap();
        let Some(user) = users.get(email) else {
            return;
        };
        self.tokens.lock().unwrap().retain(|_, id| *id != user.id);
    }

    fn session(&self, user: &MockUser) -> Value {
        let token = self.next("token");
        self.tokens
            .lock()
            .unwrap()
            .insert(token.clone(), user.id.clone());
        json!({
            "access_token": token,
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": self.next("refresh"),
            "user": user.to_json(),
        })
    }

    fn user_for(&self, headers: &HeaderMap) -> Option<MockUser> {
        let token = headers
            .get("authorization")?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")?
            .to_string();
        let id = self.tokens.lock().unwrap().get(&token).cloned()?;
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|user| user.id == id)
            .cloned()
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
}

pub static MOCK: Lazy<MockBackend> = Lazy::new(start);

fn start() -> MockBackend {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind mock backend");
    listener.set_nonblocking(true).expect("nonblocking listener");
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(MockState::default());
    let app = router(Arc::clone(&state));

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("mock runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
            axum::serve(listener, app).await.expect("mock backend stopped");
        });
    });

    MockBackend {
        base_url: format!("http://{addr}"),
        state,
    }
}

type Shared = State<Arc<MockState>>;

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/auth/v1/signup", post(signup))
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/logout", post(logout))
        .route("/auth/v1/recover", post(recover))
        .route("/auth/v1/user", get(current_user).put(update_user))
        .route(
            "/rest/v1/travel_logs",
            get(select_rows)
                .post(insert_row)
                .patch(update_rows)
                .delete(delete_rows),
        )
        .with_state(state)
}

fn failure(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn unauthorized() -> Response {
    failure(StatusCode::UNAUTHORIZED, json!({ "message": "JWT expired" }))
}

fn text(body: &Value, key: &str) -> String {
    body.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

async fn signup(State(state): Shared, Json(body): Json<Value>) -> Response {
    let email = text(&body, "email");
    let password = text(&body, "password");
    if password.len() < 6 {
        return failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "code": 422, "msg": "Password should be at least 6 characters." }),
        );
    }

    let user = {
        let mut users = state.users.lock().unwrap();
        if users.contains_key(&email) {
            return failure(
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "code": 422, "msg": "User already registered" }),
            );
        }
        let user = MockUser {
            id: state.next("user"),
            email: email.clone(),
            password,
            metadata: body.get("data").cloned().unwrap_or_else(|| json!({})),
        };
        users.insert(email.clone(), user.clone());
        user
    };

    if email.ends_with(CONFIRM_DOMAIN) {
        return Json(user.to_json()).into_response();
    }
    Json(state.session(&user)).into_response()
}

async fn token(
    State(state): Shared,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    if params.get("grant_type").map(String::as_str) != Some("password") {
        return failure(
            StatusCode::BAD_REQUEST,
            json!({ "error": "unsupported_grant_type" }),
        );
    }
    let email = text(&body, "email");
    let password = text(&body, "password");
    let user = state.users.lock().unwrap().get(&email).cloned();
    match user {
        Some(user) if user.password == password => Json(state.session(&user)).into_response(),
        _ => failure(
            StatusCode::BAD_REQUEST,
            json!({ "error": "invalid_grant", "error_description": "Invalid login credentials" }),
        ),
    }
}

async fn logout(State(state): Shared, headers: HeaderMap) -> Response {
    if let Some(token) = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
    {
        state.revoke(token);
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn recover(State(state): Shared, Json(body): Json<Value>) -> Response {
    state.recover_requests.lock().unwrap().push(text(&body, "email"));
    Json(json!({})).into_response()
}

async fn current_user(State(state): Shared, headers: HeaderMap) -> Response {
    match state.user_for(&headers) {
        Some(user) => Json(user.to_json()).into_response(),
        None => unauthorized(),
    }
}

async fn update_user(State(state): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let Some(user) = state.user_for(&headers) else {
        return unauthorized();
    };
    let mut users = state.users.lock().unwrap();
    let Some(stored) = users.get_mut(&user.email) else {
        return unauthorized();
    };
    if let (Some(target), Some(Value::Object(changes))) =
        (stored.metadata.as_object_mut(), body.get("data"))
    {
        for (key, value) in changes {
            target.insert(key.clone(), value.clone());
        }
    }
    Json(stored.to_json()).into_response()
}

/// Evaluates the PostgREST filters the client sends.
fn matches(row: &Value, params: &[(String, String)]) -> bool {
    params.iter().all(|(key, value)| {
        let field = |name: &str| row.get(name).and_then(Value::as_str).unwrap_or_default();
        match key.as_str() {
            "select" | "order" | "limit" | "offset" => true,
            "or" => {
                let needle = value
                    .split("\"*")
                    .nth(1)
                    .and_then(|rest| rest.split("*\"").next())
                    .unwrap_or_default()
                    .to_lowercase();
                field("city").to_lowercase().contains(&needle)
                    || field("memo").to_lowercase().contains(&needle)
            }
            "tags" => {
                let wanted: Vec<String> = value
                    .trim_start_matches("ov.{")
                    .trim_end_matches('}')
                    .split(',')
                    .map(|tag| tag.trim_matches('"').to_string())
                    .collect();
                row.get("tags")
                    .and_then(Value::as_array)
                    .is_some_and(|tags| {
                        tags.iter()
                            .filter_map(Value::as_str)
                            .any(|tag| wanted.iter().any(|w| w == tag))
                    })
            }
            column => {
                let actual = field(column);
                if let Some(expected) = value.strip_prefix("eq.") {
                    actual == expected
                } else if let Some(bound) = value.strip_prefix("gte.") {
                    actual >= bound
                } else if let Some(bound) = value.strip_prefix("lte.") {
                    actual <= bound
                } else {
                    false
                }
            }
        }
    })
}

fn param(params: &[(String, String)], key: &str) -> Option<usize> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .and_then(|(_, v)| v.parse().ok())
}

fn owned_by(row: &Value, user: &MockUser) -> bool {
    row.get("user_id").and_then(Value::as_str) == Some(user.id.as_str())
}

async fn select_rows(
    State(state): Shared,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let Some(user) = state.user_for(&headers) else {
        return unauthorized();
    };
    let mut rows: Vec<Value> = state
        .rows
        .lock()
        .unwrap()
        .iter()
        .filter(|row| owned_by(row, &user) && matches(row, &params))
        .cloned()
        .collect();
    rows.sort_by(|a, b| {
        let key = |row: &Value| {
            (
                row["start_date"].as_str().unwrap_or_default().to_string(),
                row["created_at"].as_str().unwrap_or_default().to_string(),
            )
        };
        key(b).cmp(&key(a))
    });

    let offset = param(&params, "offset").unwrap_or(0);
    let limit = param(&params, "limit").unwrap_or(usize::MAX);
    let page: Vec<Value> = rows.into_iter().skip(offset).take(limit).collect();
    Json(page).into_response()
}

async fn insert_row(State(state): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let Some(user) = state.user_for(&headers) else {
        return unauthorized();
    };
    let Value::Object(mut row) = body else {
        return failure(StatusCode::BAD_REQUEST, json!({ "message": "expected an object" }));
    };
    if row.get("user_id").and_then(Value::as_str) != Some(user.id.as_str()) {
        return failure(
            StatusCode::FORBIDDEN,
            json!({ "message": "new row violates row-level security policy for table \"travel_logs\"" }),
        );
    }
    let sequence = state.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    row.insert("id".into(), json!(format!("log-{sequence}")));
    row.insert(
        "created_at".into(),
        json!(format!("2024-01-01T00:00:{:02}.{:06}+00:00", sequence % 60, sequence)),
    );
    row.insert("updated_at".into(), Value::Null);
    let row = Value::Object(row);
    state.rows.lock().unwrap().push(row.clone());
    (StatusCode::CREATED, Json(vec![row])).into_response()
}

async fn update_rows(
    State(state): Shared,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
    Json(body): Json<Map<String, Value>>,
) -> Response {
    let Some(user) = state.user_for(&headers) else {
        return unauthorized();
    };
    let mut rows = state.rows.lock().unwrap();
    let mut changed = Vec::new();
    for row in rows.iter_mut() {
        if owned_by(row, &user) && matches(row, &params) {
            if let Some(fields) = row.as_object_mut() {
                for (key, value) in &body {
                    fields.insert(key.clone(), value.clone());
                }
            }
            changed.push(row.clone());
        }
    }
    Json(changed).into_response()
}

async fn delete_rows(
    State(state): Shared,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let Some(user) = state.user_for(&headers) else {
        return unauthorized();
    };
    let mut rows = state.rows.lock().unwrap();
    let (removed, kept): (Vec<Value>, Vec<Value>) = rows
        .drain(..)
        .partition(|row| owned_by(row, &user) && matches(row, &params));
    *rows = kept;
    Json(removed).into_response()
}

/// A unique address per call so tests never collide on the shared backend.
pub fn unique_email(tag: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{tag}-{}-{n}@example.com", std::process::id())
}
