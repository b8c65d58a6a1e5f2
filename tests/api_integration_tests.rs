//! Integration Tests for API Endpoints
//!
//! Drives the full request/response cycle against a real workspace on disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use file_switcher::{
    api::create_router, config::Settings, resolver::WalkFinder, workspace::Workspace, AppState,
    Resolver,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

// == Helper Functions ==

/// Workspace layout:
/// ```text
/// app/src/widget.cpp
/// app/src/net/socket.c
/// app/include/widget.hpp
/// app/include/socket.h
/// app/page.html
/// app/page.js
/// notes.txt
/// ```
fn create_workspace() -> TempDir {
    let ws = TempDir::new().unwrap();
    let root = ws.path();
    for dir in ["app/src/net", "app/include"] {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
    for file in [
        "app/src/widget.cpp",
        "app/src/net/socket.c",
        "app/include/widget.hpp",
        "app/include/socket.h",
        "app/page.html",
        "app/page.js",
        "notes.txt",
    ] {
        fs::write(root.join(file), "").unwrap();
    }
    ws
}

fn create_test_app(root: &Path) -> Router {
    let resolver = Resolver::new(
        Arc::new(WalkFinder::new()),
        Workspace::new(vec![root.to_path_buf()]),
        Settings::default(),
    );
    create_router(AppState::new(resolver))
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn activate(app: &Router, path: &Path) -> Value {
    let (status, json) = send(
        app,
        "POST",
        "/editor/active",
        Some(json!({ "path": path_string(path) })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json
}

// == Resolve and Switch ==

#[tokio::test]
async fn test_activate_then_switch() {
    let ws = create_workspace();
    let app = create_test_app(ws.path());
    let header = ws.path().join("app/include/widget.hpp");

    let json = activate(&app, &ws.path().join("app/src/widget.cpp")).await;
    assert_eq!(json["target"], path_string(&header));

    let (status, json) = send(&app, "POST", "/switch", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["target"], path_string(&header));
}

#[tokio::test]
async fn test_switch_back_from_header() {
    let ws = create_workspace();
    let app = create_test_app(ws.path());

    let json = activate(&app, &ws.path().join("app/include/widget.hpp")).await;

    assert_eq!(json["target"], path_string(&ws.path().join("app/src/widget.cpp")));
}

#[tokio::test]
async fn test_search_widens_to_parent_folder() {
    let ws = create_workspace();
    let app = create_test_app(ws.path());

    // Nothing next to socket.c, the header sits two levels up.
    let json = activate(&app, &ws.path().join("app/src/net/socket.c")).await;

    assert_eq!(json["target"], path_string(&ws.path().join("app/include/socket.h")));
}

#[tokio::test]
async fn test_unpaired_extension_has_no_target() {
    let ws = create_workspace();
    let app = create_test_app(ws.path());

    activate(&app, &ws.path().join("app/src/widget.cpp")).await;
    let json = activate(&app, &ws.path().join("notes.txt")).await;
    assert!(json["target"].is_null());

    let (status, json) = send(&app, "POST", "/switch", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("No friend file"));
}

#[tokio::test]
async fn test_null_path_clears_target() {
    let ws = create_workspace();
    let app = create_test_app(ws.path());

    activate(&app, &ws.path().join("app/src/widget.cpp")).await;
    let (status, json) = send(&app, "POST", "/editor/active", Some(json!({ "path": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["target"].is_null());

    let (status, _) = send(&app, "POST", "/switch", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_output_channel_keeps_target() {
    let ws = create_workspace();
    let app = create_test_app(ws.path());
    let header = ws.path().join("app/include/widget.hpp");

    activate(&app, &ws.path().join("app/src/widget.cpp")).await;
    let (status, _) = send(
        &app,
        "POST",
        "/editor/active",
        Some(json!({ "path": "extension-output-#1-File Switcher" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, "POST", "/switch", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["target"], path_string(&header));
}

#[tokio::test]
async fn test_relative_path_rejected() {
    let ws = create_workspace();
    let app = create_test_app(ws.path());

    let (status, json) = send(
        &app,
        "POST",
        "/editor/active",
        Some(json!({ "path": "app/src/widget.cpp" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("absolute"));
}

#[tokio::test]
async fn test_file_outside_workspace() {
    let ws = create_workspace();
    let other = create_workspace();
    let app = create_test_app(ws.path());

    let json = activate(&app, &other.path().join("app/src/widget.cpp")).await;

    assert!(json["target"].is_null());
}

// == Cache ==

#[tokio::test]
async fn test_repeat_activation_hits_cache() {
    let ws = create_workspace();
    let app = create_test_app(ws.path());
    let source = ws.path().join("app/src/widget.cpp");
    let header = ws.path().join("app/include/widget.hpp");

    activate(&app, &source).await;
    let json = activate(&app, &source).await;
    assert_eq!(json["target"], path_string(&header));

    let (status, json) = send(&app, "GET", "/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["entries"], 1);
    assert_eq!(json["capacity"], 200);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);

    let expected_bytes = path_string(&source).len() + path_string(&header).len();
    assert_eq!(json["estimated_bytes"].as_u64().unwrap() as usize, expected_bytes);
}

#[tokio::test]
async fn test_cached_answer_survives_deleted_file() {
    let ws = create_workspace();
    let app = create_test_app(ws.path());
    let source = ws.path().join("app/src/widget.cpp");
    let header = ws.path().join("app/include/widget.hpp");

    activate(&app, &source).await;
    fs::remove_file(&header).unwrap();

    let json = activate(&app, &source).await;
    assert_eq!(json["target"], path_string(&header));
}

// == Settings ==

#[tokio::test]
async fn test_settings_disable_cache() {
    let ws = create_workspace();
    let app = create_test_app(ws.path());
    let source = ws.path().join("app/src/widget.cpp");

    activate(&app, &source).await;
    let (status, json) = send(
        &app,
        "PUT",
        "/settings",
        Some(json!({ "file-switcher": { "cache.pathCount": 0 } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["applied"], json!(["cache.pathCount"]));

    activate(&app, &source).await;

    let (_, json) = send(&app, "GET", "/stats", None).await;
    assert_eq!(json["entries"], 0);
    assert_eq!(json["capacity"], 0);
    assert_eq!(json["shrink_evictions"], 1);
    assert_eq!(json["evictions"], 0);
}

#[tokio::test]
async fn test_settings_change_extension_pairs() {
    let ws = create_workspace();
    let app = create_test_app(ws.path());

    let (status, json) = send(
        &app,
        "PUT",
        "/settings",
        Some(json!({ "extensions": { "extensions1": "html", "extensions2": "js,ts" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["applied"], json!(["extensions"]));

    let json = activate(&app, &ws.path().join("app/page.js")).await;
    assert_eq!(json["target"], path_string(&ws.path().join("app/page.html")));

    let json = activate(&app, &ws.path().join("app/src/widget.cpp")).await;
    assert!(json["target"].is_null());
}

#[tokio::test]
async fn test_settings_bad_values_rejected() {
    let ws = create_workspace();
    let app = create_test_app(ws.path());

    let (status, json) = send(
        &app,
        "PUT",
        "/settings",
        Some(json!({ "file-switcher": {
            "cache.pathCount": -3,
            "log.logLevel": "loud",
            "extensions": "h,c"
        } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["applied"], json!([]));
    assert_eq!(json["rejected"].as_array().unwrap().len(), 3);

    let (_, json) = send(&app, "GET", "/stats", None).await;
    assert_eq!(json["capacity"], 200);
}

// == Health ==

#[tokio::test]
async fn test_health_endpoint() {
    let ws = create_workspace();
    let app = create_test_app(ws.path());

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}
