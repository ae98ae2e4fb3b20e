//! Mock upstream API and console helpers shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::watch;

use voice_console::api::ApiClient;
use voice_console::config::AppConfig;
use voice_console::handlers;
use voice_console::services::connectivity::{
    ConnectivityHandle, ConnectivityStatus, ProbePolicy,
};
use voice_console::state::AppState;

pub const GOOD_TOKEN: &str = "tok-1";
pub const EXPIRED_TOKEN: &str = "expired";
pub const BROKEN_TOKEN: &str = "broken";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path_and_query: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
pub struct Upstream {
    pub log: Mutex<Vec<RecordedRequest>>,
    pub approved_users: Mutex<Vec<Value>>,
    pub last_body: Mutex<Option<Value>>,
}

impl Upstream {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.log.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path_and_query.split('?').next() == Some(path))
            .collect()
    }

    pub fn last_body(&self) -> Option<Value> {
        self.last_body.lock().unwrap().clone()
    }
}

pub fn user_json(id: &str) -> Value {
    json!({
        "id": id,
        "first_name": "Asha",
        "last_name": "Rao",
        "email": format!("{id}@example.com"),
        "mobile": "9876543210",
        "approval_status": "approved",
        "email_verified": true,
        "minutes_balance": 120.0,
        "bearer_token": format!("bt-{id}"),
    })
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"success": false, "message": "Token expired"})),
    )
        .into_response()
}

#[allow(clippy::result_large_err)]
fn check_token(headers: &HeaderMap) -> Result<(), Response> {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if auth == format!("Bearer {GOOD_TOKEN}") {
        Ok(())
    } else {
        Err(unauthorized())
    }
}

async fn record(State(up): State<Arc<Upstream>>, req: Request<Body>, next: Next) -> Response {
    up.log.lock().unwrap().push(RecordedRequest {
        method: req.method().to_string(),
        path_and_query: req
            .uri()
            .path_and_query()
            .map(|p| p.to_string())
            .unwrap_or_default(),
        authorization: req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
    next.run(req).await
}

async fn login(Json(body): Json<Value>) -> Response {
    match (body["email"].as_str(), body["password"].as_str()) {
        (Some("admin@example.com"), Some("correct")) => Json(json!({
            "success": true,
            "message": "Logged in",
            "data": {
                "token": GOOD_TOKEN,
                "refresh_token": "ref-1",
                "user": user_json("admin"),
            }
        }))
        .into_response(),
        (Some("locked@example.com"), _) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid email or password"})),
        )
            .into_response(),
        (Some("pending@example.com"), _) => Json(json!({
            "success": false,
            "message": "Account pending approval",
        }))
        .into_response(),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": "Invalid credentials"})),
        )
            .into_response(),
    }
}

async fn verify(headers: HeaderMap) -> Response {
    if let Err(res) = check_token(&headers) {
        return res;
    }
    Json(json!({"success": true, "message": "ok", "data": {"valid": true}})).into_response()
}

async fn logout(headers: HeaderMap) -> Response {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if auth == format!("Bearer {BROKEN_TOKEN}") {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    Json(json!({"success": true, "message": "Logged out"})).into_response()
}

async fn list_users(headers: HeaderMap) -> Response {
    if let Err(res) = check_token(&headers) {
        return res;
    }
    Json(json!({
        "success": true,
        "message": "ok",
        "data": {"items": [user_json("u1")], "page": 1, "limit": 20, "total": 1}
    }))
    .into_response()
}

async fn create_user(
    State(up): State<Arc<Upstream>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(res) = check_token(&headers) {
        return res;
    }
    *up.last_body.lock().unwrap() = Some(body.clone());
    let mut user = user_json("new");
    user["email"] = body["email"].clone();
    user["mobile"] = body["mobile"].clone();
    Json(json!({"success": true, "message": "Created", "data": user})).into_response()
}

async fn approved_users(State(up): State<Arc<Upstream>>, headers: HeaderMap) -> Response {
    if let Err(res) = check_token(&headers) {
        return res;
    }
    let users = up.approved_users.lock().unwrap().clone();
    Json(json!({"success": true, "message": "ok", "data": users})).into_response()
}

fn assistant_json(id: &str, user_id: &str, body: &Value) -> Value {
    json!({
        "id": id,
        "user_id": user_id,
        "name": body["name"],
        "status": "draft",
        "welcome_message": body["welcome_message"],
        "system_prompt": body["system_prompt"],
        "llm": body["llm"],
        "synthesizer": body["synthesizer"],
        "transcriber": body["transcriber"],
        "io": body["io"],
        "task": body["task"],
    })
}

async fn create_assistants(
    State(up): State<Arc<Upstream>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(res) = check_token(&headers) {
        return res;
    }
    *up.last_body.lock().unwrap() = Some(body.clone());
    let created: Vec<Value> = body["user_ids"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, uid)| assistant_json(&format!("a{i}"), uid.as_str().unwrap_or(""), &body))
        .collect();
    Json(json!({"success": true, "message": "Created", "data": created})).into_response()
}

async fn get_assistant(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(res) = check_token(&headers) {
        return res;
    }
    match id.as_str() {
        "missing" => (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": "Assistant not found"})),
        )
            .into_response(),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
    }
}

fn store_body(up: &Upstream, body: &Value) {
    *up.last_body.lock().unwrap() = Some(body.clone());
}

fn ok(message: &str, data: Value) -> Response {
    Json(json!({"success": true, "message": message, "data": data})).into_response()
}

async fn update_assistant(
    State(up): State<Arc<Upstream>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(res) = check_token(&headers) {
        return res;
    }
    store_body(&up, &body);
    let mut full = assistant_json(&id, "u1", &json!({}));
    full["name"] = body["name"].clone();
    full["llm"] = serde_json::to_value(voice_console::models::LlmConfig::default()).unwrap();
    full["synthesizer"] =
        serde_json::to_value(voice_console::models::SynthesizerConfig::default()).unwrap();
    full["transcriber"] =
        serde_json::to_value(voice_console::models::TranscriberConfig::default()).unwrap();
    full["task"] = serde_json::to_value(voice_console::models::TaskConfig::default()).unwrap();
    full["io"] = body["io"].clone();
    full["welcome_message"] = json!("");
    full["system_prompt"] = json!("");
    ok("Updated", full)
}

async fn delete_assistant(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(res) = check_token(&headers) {
        return res;
    }
    Json(json!({"success": true, "message": format!("Assistant {id} deleted")})).into_response()
}

async fn assistant_status(
    State(up): State<Arc<Upstream>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(res) = check_token(&headers) {
        return res;
    }
    store_body(&up, &body);
    let mut full = assistant_json(&id, "u1", &json!({}));
    full["name"] = json!("Front desk");
    full["status"] = body["status"].clone();
    full["llm"] = serde_json::to_value(voice_console::models::LlmConfig::default()).unwrap();
    full["synthesizer"] =
        serde_json::to_value(voice_console::models::SynthesizerConfig::default()).unwrap();
    full["transcriber"] =
        serde_json::to_value(voice_console::models::TranscriberConfig::default()).unwrap();
    full["io"] = serde_json::to_value(voice_console::models::IoConfig::default()).unwrap();
    full["task"] = serde_json::to_value(voice_console::models::TaskConfig::default()).unwrap();
    ok("Status updated", full)
}

/// Echoes the JSON body onto a stock user record.
async fn user_patch(
    State(up): State<Arc<Upstream>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(res) = check_token(&headers) {
        return res;
    }
    store_body(&up, &body);
    let mut user = user_json(&id);
    if let Some(status) = body.get("approval_status") {
        user["approval_status"] = status.clone();
    }
    if let Some(token) = body.get("bearer_token") {
        user["bearer_token"] = token.clone();
    }
    if let Some(minutes) = body["minutes"].as_f64() {
        user["minutes_balance"] = json!(120.0 + minutes);
    }
    ok("Updated", user)
}

fn number_json(id: &str, status: &str, user_id: Option<&str>) -> Value {
    json!({
        "id": id,
        "number": "+14155550100",
        "provider": "twilio",
        "status": status,
        "user_id": user_id,
    })
}

async fn list_numbers(headers: HeaderMap) -> Response {
    if let Err(res) = check_token(&headers) {
        return res;
    }
    ok(
        "ok",
        json!({"items": [number_json("n1", "assigned", Some("u1"))], "page": 1, "limit": 20, "total": 1}),
    )
}

async fn available_numbers(
    headers: HeaderMap,
    Query(query): Query<std::collections::HashMap<String, String>>,
) -> Response {
    if let Err(res) = check_token(&headers) {
        return res;
    }
    let pattern = query.get("pattern").cloned().unwrap_or_default();
    ok(
        "ok",
        json!([{"number": format!("+1415{pattern}0100"), "region": query.get("country")}]),
    )
}

async fn purchase_number(
    State(up): State<Arc<Upstream>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(res) = check_token(&headers) {
        return res;
    }
    store_body(&up, &body);
    let mut number = number_json("n2", "available", None);
    number["number"] = body["number"].clone();
    number["provider"] = body["provider"].clone();
    ok("Purchased", number)
}

async fn number_action(
    State(up): State<Arc<Upstream>>,
    headers: HeaderMap,
    Path((id, action)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(res) = check_token(&headers) {
        return res;
    }
    store_body(&up, &body);
    match action.as_str() {
        "assign" => ok(
            "Assigned",
            number_json(&id, "assigned", body["user_id"].as_str()),
        ),
        "unassign" => ok("Unassigned", number_json(&id, "available", None)),
        "renew" => {
            let mut number = number_json(&id, "assigned", Some("u1"));
            number["renewal_at"] = json!("2027-01-01T00:00:00Z");
            ok("Renewed", number)
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn release_number(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(res) = check_token(&headers) {
        return res;
    }
    Json(json!({"success": true, "message": format!("Released {id}")})).into_response()
}

async fn send_code(
    State(up): State<Arc<Upstream>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(res) = check_token(&headers) {
        return res;
    }
    store_body(&up, &body);
    Json(json!({"success": true, "message": "Verification code sent"})).into_response()
}

async fn verify_code(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(res) = check_token(&headers) {
        return res;
    }
    if body["code"] == "123456" {
        Json(json!({"success": true, "message": "Email verified"})).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": "Invalid or expired code"})),
        )
            .into_response()
    }
}

async fn sample_call(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(res) = check_token(&headers) {
        return res;
    }
    Json(json!({
        "success": true,
        "message": "Queued",
        "data": {
            "id": "call-1",
            "assistant_id": body["assistant_id"],
            "recipient_phone_number": body["recipient_phone_number"],
            "status": "queued",
        }
    }))
    .into_response()
}

/// Starts the mock upstream on an ephemeral port.
pub async fn spawn_upstream() -> (String, Arc<Upstream>) {
    let upstream = Arc::new(Upstream::default());

    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/verify", get(verify))
        .route("/api/auth/logout", post(logout))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/approved-with-token", get(approved_users))
        .route("/api/assistants", post(create_assistants))
        .route(
            "/api/assistants/:id",
            get(get_assistant)
                .put(update_assistant)
                .delete(delete_assistant),
        )
        .route("/api/assistants/:id/status", patch(assistant_status))
        .route("/api/users/:id/approval", patch(user_patch))
        .route("/api/users/:id/bearer-token", patch(user_patch))
        .route("/api/users/:id/minutes", post(user_patch))
        .route("/api/phone-numbers", get(list_numbers))
        .route("/api/phone-numbers/available", get(available_numbers))
        .route("/api/phone-numbers/purchase", post(purchase_number))
        .route("/api/phone-numbers/:id", axum::routing::delete(release_number))
        .route("/api/phone-numbers/:id/:action", post(number_action))
        .route("/api/verification/send", post(send_code))
        .route("/api/verification/verify", post(verify_code))
        .route("/api/calls/sample", post(sample_call))
        .layer(middleware::from_fn_with_state(upstream.clone(), record))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api"), upstream)
}

pub fn test_config(api_url: &str) -> AppConfig {
    AppConfig {
        port: 3000,
        api_url: api_url.to_string(),
        public_url: "http://localhost:3000".to_string(),
        probe_fallback_url: "http://127.0.0.1:9/favicon.ico".to_string(),
        probe_policy: ProbePolicy::default(),
    }
}

pub struct TestConsole {
    pub state: Arc<AppState>,
    pub connectivity: watch::Sender<ConnectivityStatus>,
    pub upstream: Arc<Upstream>,
}

impl TestConsole {
    pub async fn start() -> Self {
        let (base_url, upstream) = spawn_upstream().await;
        let (tx, handle) = ConnectivityHandle::channel(ConnectivityStatus::Online);
        let state = Arc::new(AppState::new(
            test_config(&base_url),
            ApiClient::new(base_url),
            handle,
        ));
        Self {
            state,
            connectivity: tx,
            upstream,
        }
    }

    pub fn app(&self) -> Router {
        handlers::create_router(self.state.clone())
    }
}

pub fn session_cookie(token: &str) -> String {
    format!("auth_token={token}; refresh_token=ref-1; admin_user=e30")
}

pub fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn set_cookies(res: &Response) -> Vec<String> {
    res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

pub async fn body_json(res: Response) -> Value {
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub async fn body_text(res: Response) -> String {
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&body).to_string()
}
