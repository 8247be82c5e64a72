//! New-session capability negotiation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::types::BrowserKind;

/// Body of `POST /session`.
#[derive(Debug, Clone, Serialize)]
pub struct NewSessionRequest {
	pub capabilities: CapabilitiesRequest,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitiesRequest {
	pub always_match: Map<String, Value>,
}

impl NewSessionRequest {
	/// Builds the capability set for `browser`.
	///
	/// Safari has no headless mode; the flag is ignored for it.
	pub fn for_browser(browser: BrowserKind, headless: bool) -> Self {
		let mut always_match = Map::new();
		always_match.insert("browserName".into(), Value::String(browser.webdriver_name().into()));

		if headless {
			match browser {
				BrowserKind::Chrome => {
					always_match.insert("goog:chromeOptions".into(), json!({ "args": ["--headless=new"] }));
				}
				BrowserKind::Edge => {
					always_match.insert("ms:edgeOptions".into(), json!({ "args": ["--headless=new"] }));
				}
				BrowserKind::Firefox => {
					always_match.insert("moz:firefoxOptions".into(), json!({ "args": ["-headless"] }));
				}
				BrowserKind::Safari => {}
			}
		}

		Self {
			capabilities: CapabilitiesRequest { always_match },
		}
	}
}

/// `value` of a successful `POST /session`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionResponse {
	pub session_id: String,
	#[serde(default)]
	pub capabilities: Value,
}
