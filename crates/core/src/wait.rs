//! Bounded waits for landmark elements.
//!
//! A wait polls [`Browser::find`] until the element appears or the timeout
//! elapses. Elapsed time is measured on the tokio clock, so paused-time tests
//! run instantly.

use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

use crate::browser::{Browser, ElementRef, Locator};
use crate::error::{Error, Result, Step, StepContext};

/// Default timeout when none is given.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default polling interval between lookups.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Starts building a wait for `locator` on behalf of `step`.
pub fn wait_for(locator: &Locator, step: Step) -> Wait<'_> {
	Wait {
		locator,
		step,
		timeout: DEFAULT_WAIT_TIMEOUT,
		poll_interval: DEFAULT_POLL_INTERVAL,
	}
}

pub struct Wait<'a> {
	locator: &'a Locator,
	step: Step,
	timeout: Duration,
	poll_interval: Duration,
}

impl Wait<'_> {
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn with_poll_interval(mut self, interval: Duration) -> Self {
		self.poll_interval = interval;
		self
	}

	/// Resolves with the element once located, or [`Error::WaitTimeout`].
	///
	/// Driver errors other than "not found" abort the wait immediately.
	pub async fn until_located(self, browser: &mut dyn Browser) -> Result<ElementRef> {
		let start = Instant::now();

		loop {
			if let Some(element) = browser.find(self.locator).await.in_step(self.step)? {
				trace!(target = "projekt.wait", locator = %self.locator, elapsed = ?start.elapsed(), "located");
				return Ok(element);
			}

			if start.elapsed() >= self.timeout {
				return Err(Error::WaitTimeout {
					locator: self.locator.to_string(),
					timeout: self.timeout,
				});
			}

			tokio::time::sleep(self.poll_interval).await;
		}
	}
}
