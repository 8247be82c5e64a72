use projekt_protocol::{BrowserKind, error_codes};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Failures talking to, or starting, a WebDriver server.
#[derive(Debug, Error)]
pub enum RuntimeError {
	#[error("{binary} not found; install it (or pass --webdriver-url) to drive {browser}")]
	DriverNotFound { browser: BrowserKind, binary: &'static str },

	#[error("{binary} exited before becoming ready (status: {status})")]
	DriverExited { binary: String, status: String },

	#[error("WebDriver endpoint {endpoint} not ready: {last_error}")]
	DriverUnavailable { endpoint: String, last_error: String },

	#[error("HTTP request to {url} failed: {source}")]
	Http {
		url: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("WebDriver error `{code}`: {message}")]
	WebDriver { code: String, message: String },

	#[error("Protocol error: {0}")]
	Protocol(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl RuntimeError {
	/// Returns the WebDriver error code when the driver rejected a command.
	pub fn code(&self) -> Option<&str> {
		match self {
			RuntimeError::WebDriver { code, .. } => Some(code),
			_ => None,
		}
	}

	pub fn is_no_such_element(&self) -> bool {
		self.code() == Some(error_codes::NO_SUCH_ELEMENT)
	}
}
