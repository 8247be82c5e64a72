//! Browser session lifecycle.
//!
//! [`SessionManager::open`] hands out a [`SessionHandle`] that the steps borrow
//! a browser from; [`SessionManager::close`] consumes the handle so a session
//! cannot be closed twice.

use projekt_protocol::BrowserKind;
use tracing::{debug, info, warn};

use crate::browser::{Browser, BrowserLauncher};
use crate::error::{Error, Result};

/// Opens and closes sessions through a [`BrowserLauncher`].
#[derive(Debug)]
pub struct SessionManager<L> {
	launcher: L,
}

impl<L: BrowserLauncher> SessionManager<L> {
	pub fn new(launcher: L) -> Self {
		Self { launcher }
	}

	pub fn launcher(&self) -> &L {
		&self.launcher
	}

	/// Launches `browser` and wraps the session.
	pub async fn open(&self, browser: BrowserKind) -> Result<SessionHandle> {
		info!(target = "projekt.session", %browser, "launching browser");
		let inner = self
			.launcher
			.launch(browser)
			.await
			.map_err(|source| Error::Launch { browser, source })?;
		debug!(target = "projekt.session", %browser, "session ready");

		Ok(SessionHandle {
			inner,
			kind: browser,
			closed: false,
		})
	}

	/// Ends the session. Failures are logged, not returned.
	pub async fn close(&self, mut handle: SessionHandle) {
		handle.closed = true;
		match handle.inner.quit().await {
			Ok(()) => info!(target = "projekt.session", browser = %handle.kind, "session closed"),
			Err(e) => warn!(target = "projekt.session", browser = %handle.kind, error = %e, "failed to close session cleanly"),
		}
	}
}

/// A live session. Must be passed back to [`SessionManager::close`].
pub struct SessionHandle {
	inner: Box<dyn Browser>,
	kind: BrowserKind,
	closed: bool,
}

impl SessionHandle {
	pub fn browser(&mut self) -> &mut dyn Browser {
		self.inner.as_mut()
	}

	pub fn kind(&self) -> BrowserKind {
		self.kind
	}
}

impl std::fmt::Debug for SessionHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SessionHandle").field("kind", &self.kind).field("closed", &self.closed).finish()
	}
}

impl Drop for SessionHandle {
	fn drop(&mut self) {
		if !self.closed {
			warn!(target = "projekt.session", browser = %self.kind, "session dropped without close; driver will be killed");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{FakeBrowser, FakeLauncher};

	#[tokio::test]
	async fn open_then_close_quits_once() {
		let browser = FakeBrowser::new();
		let sessions = SessionManager::new(FakeLauncher::new(browser.clone()));

		let mut handle = sessions.open(BrowserKind::Edge).await.unwrap();
		assert_eq!(handle.kind(), BrowserKind::Edge);
		handle.browser().goto("https://example.test").await.unwrap();
		sessions.close(handle).await;

		assert_eq!(browser.launch_count(), 1);
		assert_eq!(browser.quit_count(), 1);
	}

	#[tokio::test]
	async fn launch_failure_is_reported_with_browser() {
		let sessions = SessionManager::new(FakeLauncher::failing(FakeBrowser::new()));
		let err = sessions.open(BrowserKind::Firefox).await.unwrap_err();
		assert!(matches!(err, Error::Launch { browser: BrowserKind::Firefox, .. }));
	}

	#[tokio::test]
	async fn failed_quit_is_swallowed() {
		let browser = FakeBrowser::new().with_failing_quit();
		let sessions = SessionManager::new(FakeLauncher::new(browser.clone()));

		let handle = sessions.open(BrowserKind::Chrome).await.unwrap();
		sessions.close(handle).await;
		assert_eq!(browser.quit_count(), 1);
	}
}
