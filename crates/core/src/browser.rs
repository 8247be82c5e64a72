//! Browser automation capability used by the archive steps.
//!
//! The steps never talk to a driver directly; they receive a `&mut dyn Browser`
//! borrowed from the [`SessionHandle`](crate::session::SessionHandle). The
//! production implementation is [`WebDriverBrowser`](crate::webdriver::WebDriverBrowser).

use async_trait::async_trait;
use projekt_protocol::{BrowserKind, LocatorStrategy, WebElement};
use serde_json::Value;

/// Result type of raw driver operations.
pub type DriverResult<T> = projekt_runtime::Result<T>;

/// How to find an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
	Id(String),
	Css(String),
	XPath(String),
}

impl Locator {
	pub fn id(id: impl Into<String>) -> Self {
		Locator::Id(id.into())
	}

	pub fn css(selector: impl Into<String>) -> Self {
		Locator::Css(selector.into())
	}

	pub fn xpath(expression: impl Into<String>) -> Self {
		Locator::XPath(expression.into())
	}

	/// Strategy and value as sent to a WebDriver server.
	///
	/// WebDriver has no id strategy; ids become an attribute selector so ids
	/// containing `:` need no CSS escaping.
	pub fn to_wire(&self) -> (LocatorStrategy, String) {
		match self {
			Locator::Id(id) => {
				let escaped = id.replace('\\', "\\\\").replace('"', "\\\"");
				(LocatorStrategy::Css, format!("[id=\"{escaped}\"]"))
			}
			Locator::Css(selector) => (LocatorStrategy::Css, selector.clone()),
			Locator::XPath(expression) => (LocatorStrategy::XPath, expression.clone()),
		}
	}
}

impl std::fmt::Display for Locator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Locator::Id(id) => write!(f, "id={id}"),
			Locator::Css(selector) => write!(f, "css={selector}"),
			Locator::XPath(expression) => write!(f, "xpath={expression}"),
		}
	}
}

/// Opaque handle to an element found in the current page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef(String);

impl ElementRef {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn id(&self) -> &str {
		&self.0
	}
}

impl From<WebElement> for ElementRef {
	fn from(element: WebElement) -> Self {
		Self(element.id)
	}
}

impl From<&ElementRef> for WebElement {
	fn from(element: &ElementRef) -> Self {
		WebElement { id: element.0.clone() }
	}
}

/// One live browser session.
///
/// Methods take `&mut self`: a session runs one command at a time.
#[async_trait]
pub trait Browser: Send {
	async fn goto(&mut self, url: &str) -> DriverResult<()>;

	/// First match, or `None` when nothing matches yet.
	async fn find(&mut self, locator: &Locator) -> DriverResult<Option<ElementRef>>;

	/// All matches in document order.
	async fn find_all(&mut self, locator: &Locator) -> DriverResult<Vec<ElementRef>>;

	/// String value of a DOM property, as resolved by the browser (an anchor's
	/// `href` is absolute). `None` when the property is unset, empty or not a string.
	async fn property(&mut self, element: &ElementRef, name: &str) -> DriverResult<Option<String>>;

	async fn send_keys(&mut self, element: &ElementRef, text: &str) -> DriverResult<()>;

	async fn click(&mut self, element: &ElementRef) -> DriverResult<()>;

	/// Runs `script` in the page with `args` bound to `arguments`.
	async fn execute(&mut self, script: &str, args: Vec<Value>) -> DriverResult<Value>;

	/// Ends the session and releases the driver.
	async fn quit(&mut self) -> DriverResult<()>;
}

/// Starts browser sessions.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
	async fn launch(&self, browser: BrowserKind) -> DriverResult<Box<dyn Browser>>;
}
