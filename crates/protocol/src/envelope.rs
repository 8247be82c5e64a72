//! Response envelope and error payload.
//!
//! Every WebDriver response body is `{ "value": ... }`. On failure the HTTP
//! status is non-2xx and `value` carries an [`ErrorValue`].

use serde::Deserialize;

/// `{ "value": T }` wrapper around every response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueEnvelope<T> {
	pub value: T,
}

/// Error payload carried in `value` on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorValue {
	/// Error code, e.g. `no such element`.
	pub error: String,
	#[serde(default)]
	pub message: String,
	#[serde(default)]
	pub stacktrace: Option<String>,
}

/// `value` of `GET /status`.
#[derive(Debug, Clone, Deserialize)]
pub struct DriverStatus {
	pub ready: bool,
	#[serde(default)]
	pub message: String,
}

/// Error codes the archiver reacts to.
pub mod error_codes {
	pub const NO_SUCH_ELEMENT: &str = "no such element";
	pub const STALE_ELEMENT_REFERENCE: &str = "stale element reference";
	pub const SESSION_NOT_CREATED: &str = "session not created";
	pub const INVALID_SESSION_ID: &str = "invalid session id";
	pub const JAVASCRIPT_ERROR: &str = "javascript error";
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_error_payload() {
		let body = r#"{"value":{"error":"no such element","message":"Unable to locate element","stacktrace":""}}"#;
		let envelope: ValueEnvelope<ErrorValue> = serde_json::from_str(body).unwrap();
		assert_eq!(envelope.value.error, error_codes::NO_SUCH_ELEMENT);
		assert_eq!(envelope.value.message, "Unable to locate element");
	}

	#[test]
	fn parses_status_without_message() {
		let envelope: ValueEnvelope<DriverStatus> = serde_json::from_str(r#"{"value":{"ready":true}}"#).unwrap();
		assert!(envelope.value.ready);
		assert!(envelope.value.message.is_empty());
	}

	#[test]
	fn null_value_is_accepted() {
		let envelope: ValueEnvelope<serde_json::Value> = serde_json::from_str(r#"{"value":null}"#).unwrap();
		assert!(envelope.value.is_null());
	}
}
