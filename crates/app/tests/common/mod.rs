//! In-process stand-in for the dashboard backend
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::Url;

use vaultdash::ApiClient;

pub const TOKEN: &str = "test-token";
pub const PASSWORD: &str = "hunter2";

#[derive(Debug, Clone)]
pub struct FakeFile {
    pub content: String,
    pub permissions: Value,
    pub passcode: Option<String>,
}

#[derive(Debug, Default)]
pub struct Recorded {
    /// `X-File-Passcode` values seen on file operations, in order
    pub passcodes: Vec<Option<String>>,
    pub permission_queries: Vec<String>,
    pub upload_fields: HashMap<String, String>,
    pub upload_file: Option<(String, Vec<u8>)>,
    pub logged_out: bool,
}

#[derive(Debug, Default)]
pub struct Backend {
    pub files: HashMap<String, FakeFile>,
    pub recycled: Vec<String>,
    pub recorded: Recorded,
}

pub type Shared = Arc<Mutex<Backend>>;

pub struct TestServer {
    pub url: Url,
    pub addr: SocketAddr,
    pub backend: Shared,
}

impl TestServer {
    pub async fn start() -> Self {
        let backend = Shared::default();
        let app = router(backend.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: Url::parse(&format!("http://{addr}/api")).unwrap(),
            addr,
            backend,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.url).unwrap().with_token(TOKEN)
    }

    pub fn anonymous_client(&self) -> ApiClient {
        ApiClient::new(&self.url).unwrap()
    }

    pub fn add_file(&self, name: &str, content: &str, permissions: Value) {
        self.insert(name, content, permissions, None);
    }

    pub fn add_locked_file(&self, name: &str, content: &str, passcode: &str) {
        let permissions = json!({
            "view": true, "download": true, "edit": true, "delete": true, "is_locked": true
        });
        self.insert(name, content, permissions, Some(passcode.to_string()));
    }

    fn insert(&self, name: &str, content: &str, permissions: Value, passcode: Option<String>) {
        self.backend.lock().unwrap().files.insert(
            name.to_string(),
            FakeFile {
                content: content.to_string(),
                permissions,
                passcode,
            },
        );
    }

    pub fn file(&self, name: &str) -> Option<FakeFile> {
        self.backend.lock().unwrap().files.get(name).cloned()
    }

    pub fn passcodes_seen(&self) -> Vec<Option<String>> {
        self.backend.lock().unwrap().recorded.passcodes.clone()
    }

    pub fn with_recorded<T>(&self, f: impl FnOnce(&Recorded) -> T) -> T {
        f(&self.backend.lock().unwrap().recorded)
    }
}

fn ok(data: Value, message: &str) -> Response {
    Json(json!({"success": true, "message": message, "data": data})).into_response()
}

fn fail(status: StatusCode, error: &str) -> Response {
    (status, Json(json!({"success": false, "error": error}))).into_response()
}

fn locked() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "success": false,
            "error": "File is locked. Passcode required.",
            "data": {"locked": true}
        })),
    )
        .into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

fn passcode_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-file-passcode")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Lock check shared by read/update/delete/download. Records the header.
fn unlock(backend: &mut Backend, name: &str, headers: &HeaderMap) -> Result<(), Response> {
    let supplied = passcode_header(headers);
    backend.recorded.passcodes.push(supplied.clone());
    let file = backend
        .files
        .get(name)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "File not found."))?;
    match &file.passcode {
        Some(expected) if supplied.as_ref() != Some(expected) => Err(locked()),
        _ => Ok(()),
    }
}

macro_rules! require_auth {
    ($headers:expr) => {
        if !authorized(&$headers) {
            return fail(StatusCode::UNAUTHORIZED, "Token is missing or invalid");
        }
    };
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] != PASSWORD {
        return fail(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }
    let username = body["username"].as_str().unwrap_or_default();
    let role = if username == "root" { "admin" } else { "user" };
    ok(
        json!({
            "token": TOKEN,
            "user": {"id": 1, "username": username, "email": format!("{username}@example.com"), "role": role}
        }),
        "Login successful",
    )
}

async fn register(Json(body): Json<Value>) -> Response {
    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Registration successful",
            "data": {
                "user_id": 42,
                "username": body["username"],
                "email": body["email"],
                "role": body["role"],
            }
        })),
    )
        .into_response()
}

async fn logout(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    require_auth!(headers);
    backend.lock().unwrap().recorded.logged_out = true;
    ok(Value::Null, "Logout successful")
}

async fn list_files(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    require_auth!(headers);
    let backend = backend.lock().unwrap();
    let files: Vec<Value> = backend
        .files
        .iter()
        .map(|(name, file)| {
            json!({
                "name": name,
                "size": file.content.len(),
                "modified": 1_700_000_000.5,
                "permissions": file.permissions,
            })
        })
        .collect();
    ok(json!({ "files": files }), "Success")
}

async fn create_file(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    require_auth!(headers);
    let name = body["filename"].as_str().unwrap_or_default().to_string();
    let content = body["content"].as_str().unwrap_or_default().to_string();
    backend.lock().unwrap().files.insert(
        name,
        FakeFile {
            content,
            permissions: json!({"view": true, "download": true, "edit": false, "delete": false}),
            passcode: None,
        },
    );
    ok(Value::Null, "File created successfully")
}

async fn permissions(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Response {
    require_auth!(headers);
    let mut backend = backend.lock().unwrap();
    backend.recorded.permission_queries.push(name.clone());
    match backend.files.get(&name) {
        Some(file) => ok(file.permissions.clone(), "Success"),
        None => ok(
            json!({"view": true, "download": true, "edit": false, "delete": false, "owner": null}),
            "Success",
        ),
    }
}

async fn read_file(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Response {
    require_auth!(headers);
    let mut backend = backend.lock().unwrap();
    if let Err(response) = unlock(&mut backend, &name, &headers) {
        return response;
    }
    let content = backend.files[&name].content.clone();
    ok(
        json!({"content": content, "filename": name, "is_binary": false}),
        "Success",
    )
}

async fn update_file(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    require_auth!(headers);
    let mut backend = backend.lock().unwrap();
    if let Err(response) = unlock(&mut backend, &name, &headers) {
        return response;
    }
    if let Some(file) = backend.files.get_mut(&name) {
        file.content = body["content"].as_str().unwrap_or_default().to_string();
    }
    ok(Value::Null, "File updated successfully")
}

async fn delete_file(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Response {
    require_auth!(headers);
    let mut backend = backend.lock().unwrap();
    if let Err(response) = unlock(&mut backend, &name, &headers) {
        return response;
    }
    backend.files.remove(&name);
    backend.recycled.push(name);
    ok(Value::Null, "File moved to recycle bin")
}

async fn download_file(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Response {
    require_auth!(headers);
    let mut backend = backend.lock().unwrap();
    if let Err(response) = unlock(&mut backend, &name, &headers) {
        return response;
    }
    backend.files[&name].content.clone().into_bytes().into_response()
}

async fn upload(
    State(backend): State<Shared>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    require_auth!(headers);
    let mut fields = HashMap::new();
    let mut file = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.unwrap_or_default();
            file = Some((file_name, bytes.to_vec()));
        } else {
            fields.insert(name, field.text().await.unwrap_or_default());
        }
    }

    let Some((file_name, _)) = file.clone() else {
        return fail(StatusCode::BAD_REQUEST, "No file part");
    };
    let permissions: Value =
        serde_json::from_str(fields.get("permissions").map(String::as_str).unwrap_or("{}"))
            .unwrap_or_default();
    let encrypted = fields.get("encrypt").map(|v| v == "true").unwrap_or(false);
    let locked = fields.get("applock").map(|v| v == "true").unwrap_or(false);

    let mut backend = backend.lock().unwrap();
    backend.recorded.upload_fields = fields;
    backend.recorded.upload_file = file;

    ok(
        json!({
            "filename": file_name,
            "encrypted": encrypted,
            "permissions": permissions,
            "locked": locked,
        }),
        "File uploaded successfully",
    )
}

async fn recycle_bin(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    require_auth!(headers);
    let backend = backend.lock().unwrap();
    let files: Vec<Value> = backend
        .recycled
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "internal_name": format!("1700000000_{name}"),
                "size": 5,
                "deleted_at": 1_700_000_000.0,
                "deleted_by": 1,
                "time_remaining": 1799,
                "original_permissions": {"view": true},
            })
        })
        .collect();
    ok(json!({ "files": files }), "Success")
}

async fn restore(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(internal_name): Path<String>,
) -> Response {
    require_auth!(headers);
    let mut backend = backend.lock().unwrap();
    let Some(original) = internal_name.strip_prefix("1700000000_").map(str::to_string) else {
        return fail(StatusCode::NOT_FOUND, "File not found in recycle bin");
    };
    backend.recycled.retain(|n| n != &original);
    ok(Value::Null, &format!("File \"{original}\" restored successfully"))
}

async fn log_stats(headers: HeaderMap) -> Response {
    require_auth!(headers);
    ok(
        json!({
            "total_logs": 12,
            "by_status": [{"status": "success", "count": 10}, {"status": "failure", "count": 2}],
            "by_action": [{"action_type": "login", "count": 7}],
            "recent_24h": 3,
        }),
        "Success",
    )
}

async fn execute(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    require_auth!(headers);
    let command = body["command"].as_str().unwrap_or_default();
    if !command.starts_with("ls") {
        return fail(StatusCode::BAD_REQUEST, "Command not allowed");
    }
    ok(
        json!({
            "call_id": 9,
            "command": command,
            "output": "notes.txt\n",
            "status": "success",
            "return_code": 0,
        }),
        "Command executed",
    )
}

fn router(backend: Shared) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/logout", post(logout))
        .route("/api/files/", get(list_files).post(create_file))
        .route("/api/files/upload", post(upload))
        .route("/api/files/permissions/:name", get(permissions))
        .route("/api/files/download/:name", get(download_file))
        .route(
            "/api/files/:name",
            get(read_file).put(update_file).delete(delete_file),
        )
        .route("/api/recycle-bin/", get(recycle_bin))
        .route("/api/recycle-bin/restore/:name", post(restore))
        .route("/api/logs/stats", get(log_stats))
        .route("/api/system/execute", post(execute))
        .with_state(backend)
}
