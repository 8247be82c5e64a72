//! Vendor WebDriver server discovery and launch.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use projekt_protocol::BrowserKind;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::connection::WebDriverConnection;
use crate::error::{Result, RuntimeError};
use crate::process::pick_free_port;

const READY_ATTEMPTS: u32 = 40;
const READY_POLL_INTERVAL: Duration = Duration::from_millis(250);
const STATUS_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Locates the driver binary for `browser` on `PATH` or in common install locations.
pub fn find_driver_executable(browser: BrowserKind) -> Option<PathBuf> {
	if let Ok(path) = which::which(browser.driver_binary()) {
		return Some(path);
	}

	driver_candidates(browser).into_iter().map(PathBuf::from).find(|path| path.exists())
}

pub(crate) fn driver_candidates(browser: BrowserKind) -> Vec<String> {
	let binary = browser.driver_binary();

	if cfg!(target_os = "macos") {
		if browser == BrowserKind::Safari {
			return vec!["/usr/bin/safaridriver".to_string()];
		}
		vec![format!("/opt/homebrew/bin/{binary}"), format!("/usr/local/bin/{binary}")]
	} else if cfg!(target_os = "windows") {
		windows_driver_candidates(binary)
	} else {
		let mut candidates = vec![
			format!("/usr/bin/{binary}"),
			format!("/usr/local/bin/{binary}"),
			format!("/snap/bin/{binary}"),
		];
		if browser == BrowserKind::Chrome {
			candidates.extend([
				"/usr/lib/chromium/chromedriver".to_string(),
				"/usr/lib/chromium-browser/chromedriver".to_string(),
				"/snap/bin/chromium.chromedriver".to_string(),
			]);
		}
		candidates
	}
}

fn windows_driver_candidates(binary: &str) -> Vec<String> {
	let mut candidates = Vec::new();
	let exe = format!("{binary}.exe");

	for key in ["LOCALAPPDATA", "PROGRAMFILES", "PROGRAMFILES(X86)"] {
		if let Ok(value) = std::env::var(key) {
			let mut path = PathBuf::from(value);
			path.push("WebDriver");
			path.push(&exe);
			candidates.push(path.to_string_lossy().to_string());
		}
	}

	candidates.push(exe);
	candidates
}

fn driver_args(browser: BrowserKind, port: u16) -> Vec<String> {
	match browser {
		BrowserKind::Chrome | BrowserKind::Edge => vec![format!("--port={port}")],
		BrowserKind::Firefox | BrowserKind::Safari => vec!["--port".to_string(), port.to_string()],
	}
}

/// A driver server spawned by this process.
///
/// The child is killed when this value is dropped, so an abandoned run still
/// reaps the driver.
#[derive(Debug)]
pub struct DriverProcess {
	child: Child,
	binary: String,
	endpoint: String,
}

impl DriverProcess {
	/// Finds and starts the driver for `browser` on a free localhost port.
	pub async fn spawn(browser: BrowserKind) -> Result<Self> {
		let path = find_driver_executable(browser).ok_or(RuntimeError::DriverNotFound {
			browser,
			binary: browser.driver_binary(),
		})?;
		let port = pick_free_port()?;
		Self::spawn_at(&path, browser, port).await
	}

	/// Starts the driver at `path` and waits until `/status` reports ready.
	pub async fn spawn_at(path: &Path, browser: BrowserKind, port: u16) -> Result<Self> {
		let binary = path.display().to_string();
		debug!(target = "projekt.runtime", %binary, port, "starting driver");

		let mut child = Command::new(path)
			.args(driver_args(browser, port))
			.stdin(Stdio::null())
			.stdout(Stdio::null())
			.stderr(Stdio::null())
			.kill_on_drop(true)
			.spawn()?;

		let endpoint = format!("http://127.0.0.1:{port}");
		let probe = WebDriverConnection::with_timeout(&endpoint, STATUS_PROBE_TIMEOUT)?;
		let mut last_error = "endpoint not reachable".to_string();

		for _ in 0..READY_ATTEMPTS {
			tokio::time::sleep(READY_POLL_INTERVAL).await;

			if let Some(status) = child.try_wait()? {
				return Err(RuntimeError::DriverExited {
					binary,
					status: status.to_string(),
				});
			}

			match probe.status().await {
				Ok(status) if status.ready => {
					info!(target = "projekt.runtime", %binary, %endpoint, "driver ready");
					return Ok(Self { child, binary, endpoint });
				}
				Ok(status) => last_error = format!("driver reports not ready: {}", status.message),
				Err(e) => last_error = e.to_string(),
			}
		}

		Err(RuntimeError::DriverUnavailable { endpoint, last_error })
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	/// Stops the driver and waits for it to exit.
	pub async fn shutdown(mut self) -> Result<()> {
		if let Some(status) = self.child.try_wait()? {
			debug!(target = "projekt.runtime", binary = %self.binary, %status, "driver already exited");
			return Ok(());
		}

		if let Err(e) = self.child.kill().await {
			warn!(target = "projekt.runtime", binary = %self.binary, error = %e, "failed to stop driver");
			return Err(e.into());
		}
		debug!(target = "projekt.runtime", binary = %self.binary, "driver stopped");
		Ok(())
	}
}
