//! Shared protocol value types.

use serde::{Deserialize, Serialize};

/// Web element reference key defined by W3C WebDriver.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Browser engines the archiver can drive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
	#[default]
	Chrome,
	Edge,
	Firefox,
	Safari,
}

impl BrowserKind {
	/// Every supported engine, in prompt order.
	pub const ALL: [BrowserKind; 4] = [BrowserKind::Chrome, BrowserKind::Edge, BrowserKind::Firefox, BrowserKind::Safari];

	/// Value of the `browserName` capability.
	pub fn webdriver_name(self) -> &'static str {
		match self {
			BrowserKind::Chrome => "chrome",
			BrowserKind::Edge => "MicrosoftEdge",
			BrowserKind::Firefox => "firefox",
			BrowserKind::Safari => "safari",
		}
	}

	/// Executable name of the vendor WebDriver server.
	pub fn driver_binary(self) -> &'static str {
		match self {
			BrowserKind::Chrome => "chromedriver",
			BrowserKind::Edge => "msedgedriver",
			BrowserKind::Firefox => "geckodriver",
			BrowserKind::Safari => "safaridriver",
		}
	}
}

impl std::str::FromStr for BrowserKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"chrome" => Ok(BrowserKind::Chrome),
			"edge" => Ok(BrowserKind::Edge),
			"firefox" => Ok(BrowserKind::Firefox),
			"safari" => Ok(BrowserKind::Safari),
			_ => Err(format!("unknown browser: {s} (expected chrome, edge, firefox or safari)")),
		}
	}
}

impl std::fmt::Display for BrowserKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			BrowserKind::Chrome => write!(f, "chrome"),
			BrowserKind::Edge => write!(f, "edge"),
			BrowserKind::Firefox => write!(f, "firefox"),
			BrowserKind::Safari => write!(f, "safari"),
		}
	}
}

/// Element reference returned by find commands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WebElement {
	#[serde(rename = "element-6066-11e4-a52e-4f735466cecf")]
	pub id: String,
}

/// Element location strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocatorStrategy {
	#[serde(rename = "css selector")]
	Css,
	#[serde(rename = "xpath")]
	XPath,
}
