//! Page locations and selectors of the hosting site.
//!
//! These mirror the site's current markup and will need updating when it
//! changes. Only the origin is configurable.

use std::time::Duration;

use crate::browser::Locator;
use crate::config::TeamId;

pub const DEFAULT_ORIGIN: &str = "https://replit.com";

/// Suffix that turns a project URL into its archive download URL.
pub const ARCHIVE_SUFFIX: &str = ".zip";

/// Manifest file read by `projectSorter.sh`.
pub const DEFAULT_MANIFEST_FILE: &str = ".projekts";

/// How long the post-login landmark may take to render.
pub const AUTH_TIMEOUT: Duration = Duration::from_secs(10);

/// How long to wait for the project list before querying a second time.
pub const FALLBACK_TIMEOUT: Duration = Duration::from_secs(10);

const USERNAME_FIELD_ID: &str = "username-:r0:";
const PASSWORD_FIELD_ID: &str = "password-:r6:";
const LOGIN_BUTTON: &str = r#"[data-cy="log-in-btn"]"#;
const HOME_LANDMARK: &str = r#"[data-cy="home-text"]"#;
const FIRST_PROJECT_TITLE: &str = r#"[data-cy="team-stack-item-title-1.16 Ex8_Hangman"]"#;
const PROJECT_LINK_TEXT: &str = "Continue working";

/// Site origin plus URL builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
	origin: String,
}

impl Default for Site {
	fn default() -> Self {
		Self::new(DEFAULT_ORIGIN)
	}
}

impl Site {
	pub fn new(origin: &str) -> Self {
		Self {
			origin: origin.trim().trim_end_matches('/').to_string(),
		}
	}

	pub fn origin(&self) -> &str {
		&self.origin
	}

	pub fn login_url(&self) -> String {
		format!("{}/login", self.origin)
	}

	pub fn team_url(&self, team: &TeamId) -> String {
		format!("{}/team/{}", self.origin, team)
	}

	/// Leading part of every project URL of `team`: `<origin>/@<team>/`.
	pub fn project_prefix(&self, team: &TeamId) -> String {
		format!("{}/@{}/", self.origin, team)
	}
}

pub fn username_field() -> Locator {
	Locator::id(USERNAME_FIELD_ID)
}

pub fn password_field() -> Locator {
	Locator::id(PASSWORD_FIELD_ID)
}

pub fn login_button() -> Locator {
	Locator::css(LOGIN_BUTTON)
}

/// Rendered only once the user is logged in.
pub fn home_landmark() -> Locator {
	Locator::css(HOME_LANDMARK)
}

/// Title of the first project card; present once the team list has rendered.
pub fn first_project_title() -> Locator {
	Locator::css(FIRST_PROJECT_TITLE)
}

/// Anchors pointing into `team` that carry the "Continue working" label.
pub fn project_links(team: &TeamId) -> Locator {
	Locator::xpath(format!(
		r#"//a[contains(@href, "@{team}/") and contains(text(), "{PROJECT_LINK_TEXT}")]"#
	))
}
