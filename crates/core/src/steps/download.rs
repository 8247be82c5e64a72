//! Rate-limited archive download triggers.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::browser::Browser;
use crate::error::Error;
use crate::site::ARCHIVE_SUFFIX;
use crate::steps::discover::DiscoveredLink;

/// Opens the archive URL in a new browsing context so the current page, and
/// any download it already started, is left alone.
const OPEN_IN_NEW_CONTEXT_JS: &str = "window.open(arguments[0], '_blank');";

/// Archive download URL derived from one project link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadJob {
	url: String,
}

impl DownloadJob {
	pub fn for_link(link: &DiscoveredLink) -> Self {
		Self {
			url: format!("{}{}", link.as_str(), ARCHIVE_SUFFIX),
		}
	}

	pub fn url(&self) -> &str {
		&self.url
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadFailure {
	pub url: String,
	pub error: String,
}

/// Outcome of the download stage. Triggers are fire-and-forget: `triggered`
/// counts archives the browser was asked to open, not files on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DownloadReport {
	pub triggered: usize,
	pub failures: Vec<DownloadFailure>,
}

impl DownloadReport {
	pub fn attempted(&self) -> usize {
		self.triggered + self.failures.len()
	}
}

/// Triggers one archive download per link, strictly in order, sleeping
/// `delay` after each trigger.
///
/// A failed trigger is recorded and the batch continues.
pub async fn download_all(browser: &mut dyn Browser, links: &[DiscoveredLink], delay: Duration) -> DownloadReport {
	let mut report = DownloadReport::default();
	let total = links.len();

	for (index, link) in links.iter().enumerate() {
		let job = DownloadJob::for_link(link);
		info!(target = "projekt.download", url = job.url(), n = index + 1, total, "triggering download");

		match browser.execute(OPEN_IN_NEW_CONTEXT_JS, vec![Value::String(job.url().to_string())]).await {
			Ok(_) => report.triggered += 1,
			Err(source) => {
				let error = Error::DownloadTrigger {
					url: job.url().to_string(),
					source,
				};
				warn!(target = "projekt.download", error = %error, "download trigger failed; continuing");
				report.failures.push(DownloadFailure {
					url: job.url().to_string(),
					error: error.to_string(),
				});
			}
		}

		tokio::time::sleep(delay).await;
	}

	info!(target = "projekt.download", triggered = report.triggered, failed = report.failures.len(), "download stage finished");
	report
}
