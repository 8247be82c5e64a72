//! [`Browser`] backed by a W3C WebDriver server.

use async_trait::async_trait;
use projekt_protocol::{BrowserKind, NewSessionRequest, WebElement};
use projekt_runtime::{DriverProcess, WebDriverConnection, WebDriverSession};
use serde_json::Value;
use tracing::{debug, warn};

use crate::browser::{Browser, BrowserLauncher, DriverResult, ElementRef, Locator};

/// Launches sessions on a local driver, spawning one per run unless an
/// external endpoint is configured.
#[derive(Debug, Clone, Default)]
pub struct WebDriverLauncher {
	endpoint: Option<String>,
	headless: bool,
}

impl WebDriverLauncher {
	pub fn new() -> Self {
		Self::default()
	}

	/// Uses an already running WebDriver server (e.g. Selenium) instead of spawning one.
	pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.endpoint = Some(endpoint.into());
		self
	}

	pub fn with_headless(mut self, headless: bool) -> Self {
		self.headless = headless;
		self
	}

	pub fn endpoint(&self) -> Option<&str> {
		self.endpoint.as_deref()
	}

	pub fn headless(&self) -> bool {
		self.headless
	}
}

#[async_trait]
impl BrowserLauncher for WebDriverLauncher {
	async fn launch(&self, browser: BrowserKind) -> DriverResult<Box<dyn Browser>> {
		if self.headless && browser == BrowserKind::Safari {
			warn!(target = "projekt.session", "safaridriver has no headless mode; opening a visible window");
		}

		let (connection, driver) = match &self.endpoint {
			Some(endpoint) => {
				debug!(target = "projekt.session", %endpoint, "using external webdriver");
				(WebDriverConnection::new(endpoint)?, None)
			}
			None => {
				let driver = DriverProcess::spawn(browser).await?;
				(WebDriverConnection::new(driver.endpoint())?, Some(driver))
			}
		};

		let request = NewSessionRequest::for_browser(browser, self.headless);
		let session = connection.new_session(&request).await?;
		Ok(Box::new(WebDriverBrowser { session, driver }))
	}
}

/// One WebDriver session, plus the driver process when this run started it.
#[derive(Debug)]
pub struct WebDriverBrowser {
	session: WebDriverSession,
	driver: Option<DriverProcess>,
}

impl WebDriverBrowser {
	pub fn new(session: WebDriverSession, driver: Option<DriverProcess>) -> Self {
		Self { session, driver }
	}
}

#[async_trait]
impl Browser for WebDriverBrowser {
	async fn goto(&mut self, url: &str) -> DriverResult<()> {
		self.session.navigate(url).await
	}

	async fn find(&mut self, locator: &Locator) -> DriverResult<Option<ElementRef>> {
		let (using, value) = locator.to_wire();
		match self.session.find_element(using, &value).await {
			Ok(element) => Ok(Some(element.into())),
			Err(e) if e.is_no_such_element() => Ok(None),
			Err(e) => Err(e),
		}
	}

	async fn find_all(&mut self, locator: &Locator) -> DriverResult<Vec<ElementRef>> {
		let (using, value) = locator.to_wire();
		let elements = self.session.find_elements(using, &value).await?;
		Ok(elements.into_iter().map(ElementRef::from).collect())
	}

	async fn property(&mut self, element: &ElementRef, name: &str) -> DriverResult<Option<String>> {
		let value = self.session.property(&WebElement::from(element), name).await?;
		Ok(string_property(value))
	}

	async fn send_keys(&mut self, element: &ElementRef, text: &str) -> DriverResult<()> {
		self.session.send_keys(&WebElement::from(element), text).await
	}

	async fn click(&mut self, element: &ElementRef) -> DriverResult<()> {
		self.session.click(&WebElement::from(element)).await
	}

	async fn execute(&mut self, script: &str, args: Vec<Value>) -> DriverResult<Value> {
		self.session.execute(script, args).await
	}

	async fn quit(&mut self) -> DriverResult<()> {
		let deleted = self.session.delete().await;
		if let Some(driver) = self.driver.take() {
			driver.shutdown().await?;
		}
		deleted
	}
}

fn string_property(value: Value) -> Option<String> {
	match value {
		Value::String(s) if !s.is_empty() => Some(s),
		_ => None,
	}
}
