//! The command's archive path with a scripted browser in place of WebDriver.

use std::time::Duration;

use clap::Parser;
use projekt::site;
use projekt::testing::{FakeBrowser, FakeLauncher};
use projekt::{BrowserKind, Credentials, SessionConfig, TeamId};
use projekt_cli::cli::Cli;
use projekt_cli::output::{OutputFormat, write_report};

fn config() -> SessionConfig {
	SessionConfig::new(
		TeamId::parse("acme").unwrap(),
		Credentials::new("me@example.com", "hunter2").unwrap(),
		Duration::from_millis(5),
		BrowserKind::Chrome,
	)
	.unwrap()
}

#[tokio::test]
async fn site_and_manifest_flags_reach_the_archiver() {
	let dir = tempfile::tempdir().unwrap();
	let manifest = dir.path().join("team.projekts");
	let cli = Cli::try_parse_from(["projekt", "--site", "https://mirror.test/", "--manifest", manifest.to_str().unwrap()]).unwrap();

	let browser = FakeBrowser::new()
		.with_login_form()
		.with_element(&site::home_landmark())
		.with_links(&["https://mirror.test/@acme/one", "https://mirror.test/@acme/two"]);

	let report = projekt_cli::archive(&cli, config(), FakeLauncher::new(browser.clone())).await.unwrap();

	assert_eq!(browser.visited(), vec!["https://mirror.test/login", "https://mirror.test/team/acme"]);
	assert_eq!(std::fs::read_to_string(&manifest).unwrap(), "one.zip\ntwo.zip");

	let mut out = Vec::new();
	write_report(&mut out, &report, OutputFormat::Text).unwrap();
	let text = String::from_utf8(out).unwrap();
	assert!(text.contains("team.projekts (2 entries)"));
}

#[test]
fn launcher_follows_webdriver_flags() {
	let cli = Cli::try_parse_from(["projekt", "--headless", "--webdriver-url", "http://127.0.0.1:9515"]).unwrap();
	let launcher = projekt_cli::launcher(&cli);
	assert!(launcher.headless());
	assert_eq!(launcher.endpoint(), Some("http://127.0.0.1:9515"));

	let launcher = projekt_cli::launcher(&Cli::try_parse_from(["projekt"]).unwrap());
	assert_eq!(launcher.endpoint(), None);
}
