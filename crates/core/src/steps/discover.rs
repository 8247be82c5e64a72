//! Project link discovery on the team page.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::browser::Browser;
use crate::config::TeamId;
use crate::error::{Error, Result, Step, StepContext};
use crate::site::{self, FALLBACK_TIMEOUT, Site};
use crate::wait::wait_for;

/// Absolute URL of one team project, as found in the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DiscoveredLink(String);

impl DiscoveredLink {
	pub fn new(url: impl Into<String>) -> Self {
		Self(url.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for DiscoveredLink {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// Queries the page once and reads each anchor's resolved `href` property.
///
/// Anchors without an `href`, or whose `href` does not point into the team,
/// are skipped. Document order is kept.
async fn collect_links(browser: &mut dyn Browser, team: &TeamId) -> Result<Vec<DiscoveredLink>> {
	let needle = format!("@{team}/");
	let anchors = browser.find_all(&site::project_links(team)).await.in_step(Step::Discover)?;

	let mut links = Vec::with_capacity(anchors.len());
	for anchor in &anchors {
		match browser.property(anchor, "href").await.in_step(Step::Discover)? {
			Some(href) if href.contains(&needle) => links.push(DiscoveredLink::new(href)),
			Some(href) => debug!(target = "projekt.discover", %href, "skipping link outside team"),
			None => debug!(target = "projekt.discover", anchor = anchor.id(), "skipping anchor without href"),
		}
	}
	Ok(links)
}

/// Navigates to the team page and returns every project link in page order.
///
/// When the first query finds nothing the list may still be rendering: waits
/// for the first project card, then queries once more with fresh handles. An
/// empty second query is [`Error::NoProjectsFound`].
pub async fn discover(browser: &mut dyn Browser, site: &Site, team: &TeamId) -> Result<Vec<DiscoveredLink>> {
	let team_url = site.team_url(team);
	info!(target = "projekt.discover", url = %team_url, "opening team page");
	browser.goto(&team_url).await.in_step(Step::Discover)?;

	let links = collect_links(browser, team).await?;
	if !links.is_empty() {
		info!(target = "projekt.discover", %team, count = links.len(), "found projects");
		return Ok(links);
	}

	debug!(target = "projekt.discover", %team, "no projects rendered yet; waiting for the project list");
	let landmark = site::first_project_title();
	match wait_for(&landmark, Step::Discover).with_timeout(FALLBACK_TIMEOUT).until_located(browser).await {
		Ok(_) => {}
		Err(Error::WaitTimeout { locator, timeout }) => {
			warn!(target = "projekt.discover", %locator, ?timeout, "project list landmark never appeared; querying again anyway")
		}
		Err(e) => return Err(e),
	}

	let links = collect_links(browser, team).await?;
	if links.is_empty() {
		return Err(Error::NoProjectsFound { team: team.to_string() });
	}
	info!(target = "projekt.discover", %team, count = links.len(), "found projects after waiting");
	Ok(links)
}
