use std::path::PathBuf;
use std::time::Duration;

use projekt_protocol::BrowserKind;
use projekt_runtime::RuntimeError;
use thiserror::Error;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
	Launch,
	Authenticate,
	Discover,
	Download,
	Manifest,
}

impl std::fmt::Display for Step {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Step::Launch => write!(f, "launch"),
			Step::Authenticate => write!(f, "authenticate"),
			Step::Discover => write!(f, "discover"),
			Step::Download => write!(f, "download"),
			Step::Manifest => write!(f, "manifest"),
		}
	}
}

#[derive(Debug, Error)]
pub enum Error {
	/// The browser could not be started. Nothing else runs.
	#[error("Failed to launch {browser}: {source}")]
	Launch {
		browser: BrowserKind,
		#[source]
		source: RuntimeError,
	},

	/// The post-login landmark never rendered. Never retried.
	#[error("Login did not complete within {timeout:?}: `{landmark}` never appeared (check the email and password)")]
	AuthTimeout { landmark: String, timeout: Duration },

	/// The team page listed no projects, even after the fallback wait.
	#[error("No projects found for team `{team}`")]
	NoProjectsFound { team: String },

	/// One archive could not be opened. The batch continues.
	#[error("Failed to trigger download of {url}: {source}")]
	DownloadTrigger {
		url: String,
		#[source]
		source: RuntimeError,
	},

	#[error("Timed out after {timeout:?} waiting for {locator}")]
	WaitTimeout { locator: String, timeout: Duration },

	#[error("{step} step: element {locator} not found")]
	ElementMissing { step: Step, locator: String },

	#[error("{step} step: {source}")]
	Browser {
		step: Step,
		#[source]
		source: RuntimeError,
	},

	#[error("Failed to write manifest {}: {source}", path.display())]
	Manifest {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Invalid configuration: {0}")]
	Config(#[from] ConfigError),
}

impl Error {
	/// Step the error originated in, when known.
	pub fn step(&self) -> Option<Step> {
		match self {
			Error::Launch { .. } => Some(Step::Launch),
			Error::AuthTimeout { .. } => Some(Step::Authenticate),
			Error::NoProjectsFound { .. } => Some(Step::Discover),
			Error::DownloadTrigger { .. } => Some(Step::Download),
			Error::ElementMissing { step, .. } | Error::Browser { step, .. } => Some(*step),
			Error::Manifest { .. } => Some(Step::Manifest),
			Error::WaitTimeout { .. } | Error::Config(_) => None,
		}
	}
}

/// Attaches the current [`Step`] to driver failures.
pub(crate) trait StepContext<T> {
	fn in_step(self, step: Step) -> Result<T>;
}

impl<T> StepContext<T> for std::result::Result<T, RuntimeError> {
	fn in_step(self, step: Step) -> Result<T> {
		self.map_err(|source| Error::Browser { step, source })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn browser_errors_name_their_step() {
		let result: std::result::Result<(), RuntimeError> = Err(RuntimeError::Protocol("boom".into()));
		let err = result.in_step(Step::Discover).unwrap_err();
		assert_eq!(err.step(), Some(Step::Discover));
		assert_eq!(err.to_string(), "discover step: Protocol error: boom");
	}

	#[test]
	fn auth_timeout_message_mentions_landmark() {
		let err = Error::AuthTimeout {
			landmark: "css=[data-cy=\"home-text\"]".into(),
			timeout: Duration::from_secs(10),
		};
		let message = err.to_string();
		assert!(message.contains("10s"));
		assert!(message.contains("home-text"));
	}
}
