//! Full archive runs against the scripted fake browser.

use std::path::PathBuf;
use std::time::Duration;

use projekt::site::{self, AUTH_TIMEOUT};
use projekt::testing::{FakeBrowser, FakeLauncher};
use projekt::{Archiver, BrowserKind, Credentials, Error, SessionConfig, TeamId};
use tempfile::TempDir;
use tokio::time::Instant;

fn config(team: &str, delay: Duration) -> SessionConfig {
	SessionConfig::new(
		TeamId::parse(team).unwrap(),
		Credentials::new("me@example.com", "hunter2").unwrap(),
		delay,
		BrowserKind::Chrome,
	)
	.unwrap()
}

fn logged_in() -> FakeBrowser {
	FakeBrowser::new().with_login_form().with_element(&site::home_landmark())
}

fn archiver(browser: &FakeBrowser, dir: &TempDir) -> (Archiver<FakeLauncher>, PathBuf) {
	let manifest = dir.path().join(".projekts");
	let archiver = Archiver::new(FakeLauncher::new(browser.clone())).with_manifest_path(&manifest);
	(archiver, manifest)
}

#[tokio::test(start_paused = true)]
async fn downloads_every_project_and_writes_manifest() {
	let dir = tempfile::tempdir().unwrap();
	let browser = logged_in().with_links(&["https://replit.com/@acme/a", "https://replit.com/@acme/b"]);
	let (archiver, manifest) = archiver(&browser, &dir);
	let start = Instant::now();

	let report = archiver.run(config("acme", Duration::from_secs(1))).await.unwrap();

	assert_eq!(std::fs::read_to_string(&manifest).unwrap(), "a.zip\nb.zip");
	assert_eq!(browser.triggered_urls(), vec!["https://replit.com/@acme/a.zip", "https://replit.com/@acme/b.zip"]);
	assert!(start.elapsed() >= Duration::from_secs(1));
	assert_eq!(report.downloads.triggered, 2);
	assert_eq!(report.manifest_entries, vec!["a.zip", "b.zip"]);
	assert!(!report.no_projects);
	assert_eq!(browser.visited(), vec!["https://replit.com/login", "https://replit.com/team/acme"]);
	assert_eq!(browser.launch_count(), 1);
	assert_eq!(browser.quit_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn manifest_lists_projects_whose_trigger_failed() {
	let dir = tempfile::tempdir().unwrap();
	let browser = logged_in()
		.with_links(&["https://replit.com/@acme/a", "https://replit.com/@acme/b", "https://replit.com/@acme/c"])
		.with_failing_download("https://replit.com/@acme/b.zip");
	let (archiver, manifest) = archiver(&browser, &dir);

	let report = archiver.run(config("acme", Duration::from_secs(5))).await.unwrap();

	assert_eq!(std::fs::read_to_string(&manifest).unwrap(), "a.zip\nb.zip\nc.zip");
	assert_eq!(report.downloads.triggered, 2);
	assert_eq!(report.downloads.failures.len(), 1);
	assert_eq!(browser.triggered_urls().len(), 3);
	assert_eq!(browser.quit_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn only_leading_team_prefix_is_stripped() {
	let dir = tempfile::tempdir().unwrap();
	let browser = logged_in().with_links(&["https://replit.com/@acme/x/https://replit.com/@acme/y"]);
	let (archiver, manifest) = archiver(&browser, &dir);

	archiver.run(config("acme", Duration::from_millis(10))).await.unwrap();

	assert_eq!(std::fs::read_to_string(&manifest).unwrap(), "x/https://replit.com/@acme/y.zip");
}

#[tokio::test(start_paused = true)]
async fn late_project_list_is_found_on_second_query() {
	let dir = tempfile::tempdir().unwrap();
	let browser = logged_in()
		.with_link_batch(Vec::new())
		.with_element_after(&site::first_project_title(), 3)
		.with_links(&["https://replit.com/@acme/late"]);
	let (archiver, manifest) = archiver(&browser, &dir);

	let report = archiver.run(config("acme", Duration::from_secs(1))).await.unwrap();

	assert_eq!(browser.find_all_count(), 2);
	assert_eq!(std::fs::read_to_string(&manifest).unwrap(), "late.zip");
	assert_eq!(report.links.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn empty_team_writes_empty_manifest_without_downloading() {
	let dir = tempfile::tempdir().unwrap();
	let browser = logged_in();
	let (archiver, manifest) = archiver(&browser, &dir);

	let report = archiver.run(config("acme", Duration::from_secs(30))).await.unwrap();

	assert!(report.no_projects);
	assert_eq!(report.downloads.attempted(), 0);
	assert!(browser.triggered_urls().is_empty());
	assert_eq!(std::fs::read_to_string(&manifest).unwrap(), "");
	assert_eq!(browser.quit_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn failed_login_closes_session_and_skips_manifest() {
	let dir = tempfile::tempdir().unwrap();
	let browser = FakeBrowser::new().with_login_form().with_links(&["https://replit.com/@acme/a"]);
	let (archiver, manifest) = archiver(&browser, &dir);
	let start = Instant::now();

	let err = archiver.run(config("acme", Duration::from_secs(1))).await.unwrap_err();

	assert!(matches!(err, Error::AuthTimeout { .. }));
	assert!(start.elapsed() >= AUTH_TIMEOUT);
	assert_eq!(browser.quit_count(), 1);
	assert_eq!(browser.find_all_count(), 0);
	assert!(browser.triggered_urls().is_empty());
	assert!(!manifest.exists());
}

#[tokio::test]
async fn launch_failure_stops_before_any_navigation() {
	let dir = tempfile::tempdir().unwrap();
	let browser = FakeBrowser::new();
	let manifest = dir.path().join(".projekts");
	let archiver = Archiver::new(FakeLauncher::failing(browser.clone())).with_manifest_path(&manifest);

	let err = archiver.run(config("acme", Duration::from_secs(1))).await.unwrap_err();

	assert!(matches!(err, Error::Launch { browser: BrowserKind::Chrome, .. }));
	assert!(browser.calls().is_empty());
	assert!(!manifest.exists());
}

#[tokio::test(start_paused = true)]
async fn unwritable_manifest_still_closes_session_first() {
	let dir = tempfile::tempdir().unwrap();
	let browser = logged_in().with_links(&["https://replit.com/@acme/a"]);
	let archiver = Archiver::new(FakeLauncher::new(browser.clone())).with_manifest_path(dir.path().join("missing").join(".projekts"));

	let err = archiver.run(config("acme", Duration::from_millis(10))).await.unwrap_err();

	assert!(matches!(err, Error::Manifest { .. }));
	assert_eq!(browser.triggered_urls().len(), 1);
	assert_eq!(browser.quit_count(), 1);
}
