use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use portal_lib::adapters::JsonFileDataset;
use portal_lib::config::Config;
use portal_lib::web::{build_router, AppState};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const DATASET: &str = r#"{"days": [
    {"anchor": "mon", "label": "Monday", "entries": [
        {"session_id": "s1", "course_code": "CS101", "slot_label": "Lab 1",
         "time_label": "10am", "status": "pending", "code": "XY9"},
        {"session_id": "s2", "course_code": "CS102", "slot_label": "Tute 4",
         "time_label": "2pm", "status": "locked", "code": "LK7"}
    ]},
    {"anchor": "tue", "label": "Tuesday", "entries": []}
]}"#;

const CODE_FIELD: &str = "ctl00%24ContentPlaceHolder1%24txtAttendanceCode";

struct Portal {
    addr: SocketAddr,
    dir: TempDir,
}

impl Portal {
    fn data_path(&self) -> std::path::PathBuf {
        self.dir.path().join("mock_units.json")
    }
}

fn write_fixture(dir: &Path) {
    std::fs::write(dir.join("mock_units.json"), DATASET).unwrap();
    let img = dir.join("static").join("img");
    std::fs::create_dir_all(&img).unwrap();
    std::fs::write(img.join("tick.png"), b"png").unwrap();
}

async fn spawn_portal() -> Portal {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let config = Config::from_lookup(|key| match key {
        "DATA_PATH" => Some(dir.path().join("mock_units.json").display().to_string()),
        "STATIC_ROOT" => Some(dir.path().join("static").display().to_string()),
        _ => None,
    })
    .unwrap();
    let config = Arc::new(config);
    let dataset = Arc::new(JsonFileDataset::new(config.data_path.clone()));
    let state = AppState::load(config, dataset).await.unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(Arc::new(state));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Portal { addr, dir }
}

async fn send_raw(addr: SocketAddr, raw_request: &[u8]) -> String {
    let mut last_err = None;
    for _ in 0..50 {
        match TcpStream::connect(addr).await {
            Ok(mut stream) => {
                stream.write_all(raw_request).await.unwrap();
                let mut buf = Vec::new();
                stream.read_to_end(&mut buf).await.unwrap();
                return String::from_utf8_lossy(&buf).to_string();
            }
            Err(err) => {
                last_err = Some(err);
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        }
    }
    panic!("server not ready: {:?}", last_err);
}

async fn get(addr: SocketAddr, path: &str) -> String {
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        path
    );
    send_raw(addr, request.as_bytes()).await
}

async fn post_form(addr: SocketAddr, path: &str, body: &str) -> String {
    let request = format!(
        "POST {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\nContent-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\n\r\n{}",
        path,
        body.len(),
        body
    );
    send_raw(addr, request.as_bytes()).await
}

async fn submit(addr: SocketAddr, session_id: &str, code: &str) -> String {
    post_form(
        addr,
        &format!("/student/Entry.aspx?s={}", session_id),
        &format!("{}={}", CODE_FIELD, code),
    )
    .await
}

fn status_line(response: &str) -> &str {
    response.lines().next().unwrap_or_default()
}

fn body(response: &str) -> &str {
    response
        .split_once("\r\n\r\n")
        .map(|(_, body)| body)
        .unwrap_or_default()
}

#[tokio::test]
async fn root_redirects_to_units() {
    let portal = spawn_portal().await;
    for path in ["/", "/student/"] {
        let response = get(portal.addr, path).await;
        assert!(status_line(&response).contains("302"), "{}", response);
        assert!(response
            .to_ascii_lowercase()
            .contains("location: /student/units.aspx"));
    }
}

#[tokio::test]
async fn units_page_lists_days_without_codes() {
    let portal = spawn_portal().await;
    let response = get(portal.addr, "/student/Units.aspx").await;
    assert!(status_line(&response).contains("200"));
    assert!(response.contains(r#"<option value="mon" selected="selected">Monday</option>"#));
    assert!(response.contains(r#"href="Entry.aspx?s=s1&d=mon""#));
    assert!(response.contains("ui-disabled"));
    assert!(response.contains(r#"<base href="http://localhost/student/Units.aspx">"#));
    assert!(!response.contains("XY9"));
    assert!(!response.contains("LK7"));
}

#[tokio::test]
async fn entry_page_needs_a_known_session() {
    let portal = spawn_portal().await;

    let response = get(portal.addr, "/student/Entry.aspx").await;
    assert!(status_line(&response).contains("400"));
    assert!(response.contains("Missing session id"));

    let response = get(portal.addr, "/student/Entry.aspx?s=missing").await;
    assert!(status_line(&response).contains("404"));
    assert!(response.contains("Session not found"));

    let response = submit(portal.addr, "missing", "XY9").await;
    assert!(status_line(&response).contains("404"));

    let response = get(portal.addr, "/student/Entry.aspx?session=s1").await;
    assert!(status_line(&response).contains("200"));
    assert!(response.contains("<p><strong>Status:</strong> Pending</p>"));
    assert!(!response.contains("XY9"));
}

#[tokio::test]
async fn submission_flow_and_reset() {
    let portal = spawn_portal().await;

    let response = submit(portal.addr, "s1", "nope").await;
    assert!(response.contains("Invalid code. Please try again."));
    assert!(response.contains("<p><strong>Status:</strong> Pending</p>"));

    let response = submit(portal.addr, "s1", "+xy9+").await;
    assert!(response.contains("Code submitted successfully."));
    assert!(response.contains("<p><strong>Status:</strong> Submitted</p>"));

    let response = submit(portal.addr, "s1", "garbage").await;
    assert!(response.contains("Code submitted successfully."));

    let listing = get(portal.addr, "/mock/sessions").await;
    assert!(!listing.contains("XY9"));
    let days: serde_json::Value = serde_json::from_str(body(&listing)).unwrap();
    assert_eq!(days[0]["anchor"], "mon");
    assert_eq!(days[0]["entries"][0]["session_id"], "s1");
    assert_eq!(days[0]["entries"][0]["status"], "submitted");
    assert_eq!(days[0]["entries"][1]["status"], "locked");
    assert!(days[0]["entries"][0].get("code").is_none());
    assert_eq!(days[1]["entries"].as_array().map(Vec::len), Some(0));

    let response = post_form(portal.addr, "/mock/reset", "").await;
    assert!(status_line(&response).contains("200"));
    assert!(response.contains(r#"{"status":"ok"}"#));

    let response = get(portal.addr, "/student/Entry.aspx?s=s1").await;
    assert!(response.contains("<p><strong>Status:</strong> Pending</p>"));
}

#[tokio::test]
async fn repeated_session_key_uses_first_value() {
    let portal = spawn_portal().await;
    let response = get(portal.addr, "/student/Entry.aspx?s=s1&s=s2").await;
    assert!(status_line(&response).contains("200"));
    assert!(response.contains("<p><strong>Activity:</strong> Lab 1</p>"));

    let response = submit(portal.addr, "s1&s=s2", "XY9").await;
    assert!(response.contains("Code submitted successfully."));
    assert!(response.contains("<p><strong>Status:</strong> Submitted</p>"));
}

#[tokio::test]
async fn locked_session_refuses_its_code() {
    let portal = spawn_portal().await;
    let response = submit(portal.addr, "s2", "LK7").await;
    assert!(response.contains("Invalid code. Please try again."));
    assert!(response.contains("<p><strong>Status:</strong> Locked</p>"));
}

#[tokio::test]
async fn submission_without_form_body_counts_as_empty_code() {
    let portal = spawn_portal().await;
    let response = send_raw(
        portal.addr,
        b"POST /student/Entry.aspx?s=s1 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\nContent-Length: 0\r\n\r\n",
    )
    .await;
    assert!(status_line(&response).contains("200"));
    assert!(response.contains("Invalid code. Please try again."));
}

#[tokio::test]
async fn broken_dataset_reset_keeps_current_state() {
    let portal = spawn_portal().await;
    submit(portal.addr, "s1", "XY9").await;

    std::fs::write(portal.data_path(), r#"{"days": [{"label": "No anchor"}]}"#).unwrap();
    let response = post_form(portal.addr, "/mock/reset", "").await;
    assert!(status_line(&response).contains("500"));
    assert!(response.contains("Malformed dataset"));

    let response = get(portal.addr, "/student/Entry.aspx?s=s1").await;
    assert!(response.contains("<p><strong>Status:</strong> Submitted</p>"));
}

#[tokio::test]
async fn static_assets_are_served() {
    let portal = spawn_portal().await;
    let response = get(portal.addr, "/student/img/tick.png").await;
    assert!(status_line(&response).contains("200"));
    assert!(response.ends_with("png"));

    let response = get(portal.addr, "/static/img/tick.png").await;
    assert!(status_line(&response).contains("200"));
}

#[test]
fn bundled_static_root_ships_list_icons() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../static");
    for icon in ["tick.png", "question.png"] {
        let bytes = std::fs::read(root.join("img").join(icon)).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "{} is not a PNG", icon);
    }
    assert!(root.join("jq").is_dir());
    assert!(root.join("jqm").join("customPageScript.js").is_file());
}
