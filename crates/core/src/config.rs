//! Validated run configuration.
//!
//! A [`SessionConfig`] is built once, before any browser work, and handed to
//! [`Archiver::run`](crate::Archiver::run) by value.

use std::time::Duration;

use projekt_protocol::BrowserKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
	#[error("{0} must not be empty")]
	Empty(&'static str),

	#[error("team name `{0}` may only contain letters, digits, '-', '_' and '.'")]
	InvalidTeam(String),

	#[error("delay `{0}` must be a number of seconds greater than zero")]
	InvalidDelay(String),
}

/// Team slug as it appears in `/team/<slug>` and `/@<slug>/` URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TeamId(String);

impl TeamId {
	pub fn parse(raw: &str) -> Result<Self, ConfigError> {
		let slug = raw.trim();
		if slug.is_empty() {
			return Err(ConfigError::Empty("team name"));
		}
		if !slug.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')) {
			return Err(ConfigError::InvalidTeam(slug.to_string()));
		}
		Ok(Self(slug.to_string()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for TeamId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// Login email and password. Held in memory only; `Debug` hides the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	email: String,
	password: String,
}

impl Credentials {
	pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, ConfigError> {
		let email = email.into();
		let password = password.into();
		if email.trim().is_empty() {
			return Err(ConfigError::Empty("email"));
		}
		if password.is_empty() {
			return Err(ConfigError::Empty("password"));
		}
		Ok(Self {
			email: email.trim().to_string(),
			password,
		})
	}

	pub fn email(&self) -> &str {
		&self.email
	}

	pub fn password(&self) -> &str {
		&self.password
	}
}

impl std::fmt::Debug for Credentials {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Credentials")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Parses a delay given in (possibly fractional) seconds.
pub fn parse_delay_secs(raw: &str) -> Result<Duration, ConfigError> {
	let trimmed = raw.trim();
	match trimmed.parse::<f64>() {
		Ok(secs) if secs.is_finite() && secs > 0.0 => Ok(Duration::from_secs_f64(secs)),
		_ => Err(ConfigError::InvalidDelay(trimmed.to_string())),
	}
}

/// Everything one archive run needs.
#[derive(Debug, Clone)]
pub struct SessionConfig {
	team: TeamId,
	credentials: Credentials,
	delay: Duration,
	browser: BrowserKind,
}

impl SessionConfig {
	/// Fails when `delay` is zero.
	pub fn new(team: TeamId, credentials: Credentials, delay: Duration, browser: BrowserKind) -> Result<Self, ConfigError> {
		if delay.is_zero() {
			return Err(ConfigError::InvalidDelay(format!("{delay:?}")));
		}
		Ok(Self {
			team,
			credentials,
			delay,
			browser,
		})
	}

	pub fn team(&self) -> &TeamId {
		&self.team
	}

	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Pause after each download trigger.
	pub fn delay(&self) -> Duration {
		self.delay
	}

	pub fn browser(&self) -> BrowserKind {
		self.browser
	}
}
