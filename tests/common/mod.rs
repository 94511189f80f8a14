use std::process::{Command, Output};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{Context, Result};
use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::{Map, Value, json};
use tokio::sync::oneshot;

pub const GOOD_TOKEN: &str = "ghp_good";
/// Accepted for reads, refused with 403 on updates.
pub const READONLY_TOKEN: &str = "ghp_readonly";

const UPDATED_AT: &str = "2024-02-01T00:00:00Z";

#[derive(Clone, Debug)]
#[allow(dead_code)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub api_version: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockData {
    gists: Vec<Value>,
    next_id: u64,
    requests: Vec<Recorded>,
}

#[derive(Clone, Default)]
struct MockState {
    inner: Arc<Mutex<MockData>>,
}

/// An in-process stand-in for the gist API, seeded with three gists:
/// `g1` (two files), `g2` (one file, null description) and `g3` (no files).
pub struct ServerGuard {
    pub base_url: String,
    state: MockState,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(t) = self.thread.take() {
            let _ = t.join();
        }
    }
}

#[allow(dead_code)]
impl ServerGuard {
    pub fn requests(&self) -> Vec<Recorded> {
        self.state.inner.lock().unwrap().requests.clone()
    }

    pub fn requests_with(&self, method: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }

    pub fn gist(&self, id: &str) -> Option<Value> {
        let data = self.state.inner.lock().unwrap();
        data.gists.iter().find(|g| g["id"] == id).cloned()
    }

    pub fn gist_count(&self) -> usize {
        self.state.inner.lock().unwrap().gists.len()
    }
}

pub fn spawn_server() -> Result<ServerGuard> {
    let state = MockState::default();
    {
        let mut data = state.inner.lock().unwrap();
        data.gists = vec![
            gist_json(
                "g1",
                json!("Shell tricks"),
                true,
                &[("a.txt", "alpha"), ("c.txt", "gamma")],
            ),
            gist_json("g2", Value::Null, false, &[("notes.md", "# notes")]),
            gist_json("g3", json!("Empty"), false, &[]),
        ];
        data.next_id = 100;
    }

    let app = Router::new()
        .route("/gists", get(list_gists).post(create_gist))
        .route(
            "/gists/:id",
            get(get_gist).patch(update_gist).delete(delete_gist),
        )
        .with_state(state.clone());

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let (ready_tx, ready_rx) = mpsc::channel();
    let thread = thread::Builder::new()
        .name("mock-gist-api".into())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(err) => {
                    let _ = ready_tx.send(Err(err.to_string()));
                    return;
                }
            };
            rt.block_on(async move {
                let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
                    Ok(l) => l,
                    Err(err) => {
                        let _ = ready_tx.send(Err(err.to_string()));
                        return;
                    }
                };
                let addr = listener.local_addr().map_err(|e| e.to_string());
                let _ = ready_tx.send(addr);
                let _ = axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = shutdown_rx.await;
                    })
                    .await;
            });
        })
        .context("spawn mock server thread")?;

    let addr = ready_rx
        .recv()
        .context("mock server did not report an address")?
        .map_err(|e| anyhow::anyhow!("mock server failed to start: {}", e))?;

    Ok(ServerGuard {
        base_url: format!("http://{}", addr),
        state,
        shutdown: Some(shutdown_tx),
        thread: Some(thread),
    })
}

fn file_json(name: &str, content: &str) -> Value {
    json!({
        "filename": name,
        "type": "text/plain",
        "language": null,
        "raw_url": format!("https://gist.example/raw/{}", name),
        "size": content.len(),
        "content": content,
        "truncated": false,
    })
}

fn gist_json(id: &str, description: Value, public: bool, files: &[(&str, &str)]) -> Value {
    let files: Map<String, Value> = files
        .iter()
        .map(|(name, content)| (name.to_string(), file_json(name, content)))
        .collect();
    json!({
        "id": id,
        "html_url": format!("https://gist.example/{}", id),
        "description": description,
        "public": public,
        "created_at": "2024-01-02T03:04:05Z",
        "updated_at": "2024-01-02T03:04:05Z",
        "files": files,
    })
}

/// The list endpoint leaves file content out.
fn summary(gist: &Value) -> Value {
    let mut g = gist.clone();
    if let Some(files) = g["files"].as_object_mut() {
        for f in files.values_mut() {
            if let Some(obj) = f.as_object_mut() {
                obj.remove("content");
                obj.remove("truncated");
            }
        }
    }
    g
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

impl MockState {
    fn record(&self, method: &str, path: String, headers: &HeaderMap, body: Option<Value>) {
        self.inner.lock().unwrap().requests.push(Recorded {
            method: method.to_string(),
            path,
            authorization: header(headers, "authorization"),
            accept: header(headers, "accept"),
            api_version: header(headers, "x-github-api-version"),
            body,
        });
    }
}

fn token(headers: &HeaderMap) -> Option<String> {
    header(headers, "authorization").and_then(|v| v.strip_prefix("token ").map(str::to_string))
}

fn check_auth(headers: &HeaderMap) -> Result<String, Response> {
    match token(headers) {
        Some(t) if t == GOOD_TOKEN || t == READONLY_TOKEN => Ok(t),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Bad credentials" })),
        )
            .into_response()),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))).into_response()
}

async fn list_gists(State(st): State<MockState>, headers: HeaderMap) -> Response {
    st.record("GET", "/gists".to_string(), &headers, None);
    if let Err(resp) = check_auth(&headers) {
        return resp;
    }
    let data = st.inner.lock().unwrap();
    let list: Vec<Value> = data.gists.iter().map(summary).collect();
    Json(Value::Array(list)).into_response()
}

async fn get_gist(
    State(st): State<MockState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    st.record("GET", format!("/gists/{}", id), &headers, None);
    if let Err(resp) = check_auth(&headers) {
        return resp;
    }
    let data = st.inner.lock().unwrap();
    match data.gists.iter().find(|g| g["id"] == id.as_str()) {
        Some(g) => Json(g.clone()).into_response(),
        None => not_found(),
    }
}

async fn create_gist(
    State(st): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    st.record("POST", "/gists".to_string(), &headers, Some(body.clone()));
    if let Err(resp) = check_auth(&headers) {
        return resp;
    }
    let files: Vec<(String, String)> = body["files"]
        .as_object()
        .map(|m| {
            m.iter()
                .map(|(k, v)| (k.clone(), v["content"].as_str().unwrap_or("").to_string()))
                .collect()
        })
        .unwrap_or_default();
    if files.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "Validation Failed" })),
        )
            .into_response();
    }

    let mut data = st.inner.lock().unwrap();
    data.next_id += 1;
    let id = format!("n{}", data.next_id);
    let refs: Vec<(&str, &str)> = files
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    let gist = gist_json(
        &id,
        body["description"].clone(),
        body["public"].as_bool().unwrap_or(false),
        &refs,
    );
    data.gists.insert(0, gist.clone());
    (StatusCode::CREATED, Json(gist)).into_response()
}

async fn update_gist(
    State(st): State<MockState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    st.record("PATCH", format!("/gists/{}", id), &headers, Some(body.clone()));
    let token = match check_auth(&headers) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    if token == READONLY_TOKEN {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "message": "Resource not accessible by personal access token" })),
        )
            .into_response();
    }

    let mut data = st.inner.lock().unwrap();
    let Some(gist) = data.gists.iter_mut().find(|g| g["id"] == id.as_str()) else {
        return not_found();
    };
    if let Some(desc) = body.get("description") {
        gist["description"] = desc.clone();
    }
    if let Some(patch) = body.get("files").and_then(Value::as_object) {
        let mut files = gist["files"].as_object().cloned().unwrap_or_default();
        for (key, entry) in patch {
            let existing = files.remove(key);
            if entry.is_null() {
                continue;
            }
            let content = entry["content"]
                .as_str()
                .map(str::to_string)
                .or_else(|| {
                    existing
                        .as_ref()
                        .and_then(|f| f["content"].as_str().map(str::to_string))
                })
                .unwrap_or_default();
            let name = entry["filename"].as_str().unwrap_or(key);
            files.insert(name.to_string(), file_json(name, &content));
        }
        gist["files"] = Value::Object(files);
    }
    gist["updated_at"] = json!(UPDATED_AT);
    Json(gist.clone()).into_response()
}

async fn delete_gist(
    State(st): State<MockState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    st.record("DELETE", format!("/gists/{}", id), &headers, None);
    if let Err(resp) = check_auth(&headers) {
        return resp;
    }
    let mut data = st.inner.lock().unwrap();
    let before = data.gists.len();
    data.gists.retain(|g| g["id"] != id.as_str());
    if data.gists.len() == before {
        return not_found();
    }
    StatusCode::NO_CONTENT.into_response()
}

/// Runs the CLI against `base_url` with a private state directory and no
/// inherited token or log settings.
#[allow(dead_code)]
pub fn run_gistdeck(state_dir: &std::path::Path, base_url: &str, args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_gistdeck"))
        .arg("--state-dir")
        .arg(state_dir)
        .arg("--api-url")
        .arg(base_url)
        .args(args)
        .env_remove("GISTDECK_TOKEN")
        .env_remove("GISTDECK_HOME")
        .env_remove("RUST_LOG")
        .output()
        .with_context(|| format!("run gistdeck {:?}", args))
}

/// Like `run_gistdeck`, but fails unless the command succeeded; returns stdout.
#[allow(dead_code)]
pub fn gistdeck_ok(state_dir: &std::path::Path, base_url: &str, args: &[&str]) -> Result<String> {
    let out = run_gistdeck(state_dir, base_url, args)?;
    if !out.status.success() {
        anyhow::bail!(
            "gistdeck {:?} failed (status {:?})\nstdout:\n{}\nstderr:\n{}",
            args,
            out.status,
            String::from_utf8_lossy(&out.stdout),
            String::from_utf8_lossy(&out.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&out.stdout).to_string())
}
