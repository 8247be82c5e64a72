//! A complete run through `WebDriverLauncher` against an in-process fake driver.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use projekt::{Archiver, BrowserKind, Credentials, SessionConfig, Site, TeamId, WebDriverLauncher};
use serde_json::{Value, json};
use tokio::net::TcpListener;

const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

#[derive(Default)]
struct Recorded {
	visited: Vec<String>,
	typed: Vec<String>,
	opened: Vec<String>,
	deleted: bool,
}

type Shared = Arc<Mutex<Recorded>>;

fn value(value: Value) -> Response {
	Json(json!({ "value": value })).into_response()
}

async fn navigate(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
	state.lock().unwrap().visited.push(body["url"].as_str().unwrap().to_string());
	value(Value::Null)
}

async fn find_element(Json(body): Json<Value>) -> Response {
	let id: String = body["value"].as_str().unwrap_or_default().chars().filter(char::is_ascii_alphanumeric).collect();
	value(json!({ ELEMENT_KEY: format!("e-{id}") }))
}

async fn find_elements() -> Response {
	value(json!([{ ELEMENT_KEY: "anchor-a" }, { ELEMENT_KEY: "anchor-b" }]))
}

fn project_path(element: &str) -> Option<&'static str> {
	match element {
		"anchor-a" => Some("/@acme/alpha"),
		"anchor-b" => Some("/@acme/beta"),
		_ => None,
	}
}

/// Raw attribute: the `href` exactly as written in the markup.
async fn attribute(Path((_, element, _)): Path<(String, String, String)>) -> Response {
	value(project_path(&element).map_or(Value::Null, |path| json!(path)))
}

/// DOM property: the `href` resolved against the page origin.
async fn property(State(state): State<Shared>, Path((_, element, _)): Path<(String, String, String)>) -> Response {
	let origin = state.lock().unwrap().visited.first().and_then(|url| url.strip_suffix("/login").map(str::to_string));
	let origin = origin.unwrap_or_default();
	value(project_path(&element).map_or(Value::Null, |path| json!(format!("{origin}{path}"))))
}

async fn send_keys(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
	state.lock().unwrap().typed.push(body["text"].as_str().unwrap().to_string());
	value(Value::Null)
}

async fn execute(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
	state.lock().unwrap().opened.push(body["args"][0].as_str().unwrap().to_string());
	value(Value::Null)
}

async fn delete_session(State(state): State<Shared>) -> Response {
	state.lock().unwrap().deleted = true;
	value(Value::Null)
}

async fn start_fake_driver(state: Shared) -> String {
	let app = Router::new()
		.route("/status", get(|| async { value(json!({ "ready": true, "message": "" })) }))
		.route(
			"/session",
			post(|| async { value(json!({ "sessionId": "s-9", "capabilities": { "browserName": "chrome", "browserVersion": "1" } })) }),
		)
		.route("/session/{id}", delete(delete_session))
		.route("/session/{id}/url", post(navigate))
		.route("/session/{id}/element", post(find_element))
		.route("/session/{id}/elements", post(find_elements))
		.route("/session/{id}/element/{element}/attribute/{name}", get(attribute))
		.route("/session/{id}/element/{element}/property/{name}", get(property))
		.route("/session/{id}/element/{element}/value", post(send_keys))
		.route("/session/{id}/element/{element}/click", post(|| async { value(Value::Null) }))
		.route("/session/{id}/execute/sync", post(execute))
		.with_state(state);

	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move {
		axum::serve(listener, app).await.unwrap();
	});
	format!("http://{addr}")
}

#[tokio::test]
async fn run_drives_external_webdriver_end_to_end_with_relative_hrefs() {
	let state = Shared::default();
	let endpoint = start_fake_driver(state.clone()).await;
	let dir = tempfile::tempdir().unwrap();
	let manifest = dir.path().join(".projekts");

	let origin = "https://site.test";
	let archiver = Archiver::new(WebDriverLauncher::new().with_endpoint(endpoint).with_headless(true))
		.with_site(Site::new(origin))
		.with_manifest_path(&manifest);
	let config = SessionConfig::new(
		TeamId::parse("acme").unwrap(),
		Credentials::new("me@example.com", "hunter2").unwrap(),
		Duration::from_millis(20),
		BrowserKind::Chrome,
	)
	.unwrap();

	let report = archiver.run(config).await.unwrap();

	let recorded = state.lock().unwrap();
	assert_eq!(recorded.visited, vec!["https://site.test/login", "https://site.test/team/acme"]);
	assert_eq!(recorded.typed, vec!["me@example.com", "hunter2"]);
	assert_eq!(recorded.opened, vec!["https://site.test/@acme/alpha.zip", "https://site.test/@acme/beta.zip"]);
	assert!(recorded.deleted);
	assert_eq!(report.downloads.triggered, 2);
	assert_eq!(std::fs::read_to_string(&manifest).unwrap(), "alpha.zip\nbeta.zip");
}
