//! End-to-end archive run: launch, log in, discover, download, write manifest.

use std::path::{Path, PathBuf};

use projekt_protocol::BrowserKind;
use serde::Serialize;
use tracing::{info, warn};

use crate::browser::{Browser, BrowserLauncher};
use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::manifest::{manifest_entries, write_manifest};
use crate::session::SessionManager;
use crate::site::{DEFAULT_MANIFEST_FILE, Site};
use crate::steps::{DiscoveredLink, DownloadReport, authenticate, discover, download_all};

/// Summary of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
	pub team: String,
	pub browser: BrowserKind,
	pub links: Vec<DiscoveredLink>,
	pub downloads: DownloadReport,
	pub manifest_path: PathBuf,
	pub manifest_entries: Vec<String>,
	/// The team page listed no projects; nothing was downloaded.
	pub no_projects: bool,
}

/// What the browser stages produced before the session closed.
struct Harvest {
	links: Vec<DiscoveredLink>,
	downloads: DownloadReport,
	no_projects: bool,
}

/// Runs the whole pipeline against one launcher.
#[derive(Debug)]
pub struct Archiver<L> {
	sessions: SessionManager<L>,
	site: Site,
	manifest_path: PathBuf,
}

impl<L: BrowserLauncher> Archiver<L> {
	pub fn new(launcher: L) -> Self {
		Self {
			sessions: SessionManager::new(launcher),
			site: Site::default(),
			manifest_path: PathBuf::from(DEFAULT_MANIFEST_FILE),
		}
	}

	pub fn with_site(mut self, site: Site) -> Self {
		self.site = site;
		self
	}

	/// Where the manifest is written. Defaults to `.projekts` in the working directory.
	pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.manifest_path = path.into();
		self
	}

	pub fn site(&self) -> &Site {
		&self.site
	}

	pub fn manifest_path(&self) -> &Path {
		&self.manifest_path
	}

	/// Executes one run.
	///
	/// The session is closed exactly once whether the browser stages succeed
	/// or not. The manifest is written only after a successful login, and
	/// contains one entry per discovered link regardless of download outcome.
	pub async fn run(&self, config: SessionConfig) -> Result<RunReport> {
		info!(
			target = "projekt.session",
			team = %config.team(),
			browser = %config.browser(),
			delay = ?config.delay(),
			"starting archive run"
		);

		let mut handle = self.sessions.open(config.browser()).await?;
		let outcome = self.harvest(handle.browser(), &config).await;
		self.sessions.close(handle).await;
		let harvest = outcome?;

		let entries = manifest_entries(&harvest.links, &self.site, config.team());
		write_manifest(&self.manifest_path, &entries)?;

		Ok(RunReport {
			team: config.team().to_string(),
			browser: config.browser(),
			links: harvest.links,
			downloads: harvest.downloads,
			manifest_path: self.manifest_path.clone(),
			manifest_entries: entries,
			no_projects: harvest.no_projects,
		})
	}

	async fn harvest(&self, browser: &mut dyn Browser, config: &SessionConfig) -> Result<Harvest> {
		authenticate(browser, &self.site, config.credentials()).await?;

		let links = match discover(browser, &self.site, config.team()).await {
			Ok(links) => links,
			Err(Error::NoProjectsFound { team }) => {
				warn!(target = "projekt.discover", %team, "no projects found; skipping downloads");
				return Ok(Harvest {
					links: Vec::new(),
					downloads: DownloadReport::default(),
					no_projects: true,
				});
			}
			Err(e) => return Err(e),
		};

		let downloads = download_all(browser, &links, config.delay()).await;
		Ok(Harvest {
			links,
			downloads,
			no_projects: false,
		})
	}
}
