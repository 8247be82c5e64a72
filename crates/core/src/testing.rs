//! Scripted in-memory browser for exercising the archive steps without a driver.
//!
//! # Example
//!
//! ```ignore
//! let browser = FakeBrowser::new()
//!     .with_login_form()
//!     .with_element(&site::home_landmark())
//!     .with_links(&["https://replit.com/@acme/a"]);
//! let archiver = Archiver::new(FakeLauncher::new(browser.clone()));
//! archiver.run(config).await?;
//! assert_eq!(browser.quit_count(), 1);
//! ```

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use projekt_protocol::{BrowserKind, error_codes};
use projekt_runtime::RuntimeError;
use serde_json::Value;

use crate::browser::{Browser, BrowserLauncher, DriverResult, ElementRef, Locator};
use crate::site;

/// One recorded browser command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
	Goto(String),
	Find(Locator),
	FindAll(Locator),
	Property(ElementRef, String),
	SendKeys(ElementRef, String),
	Click(ElementRef),
	Execute(Vec<Value>),
	Quit,
}

#[derive(Debug, Default)]
struct FakeState {
	/// Locator -> lookups that still miss before the element is present.
	elements: HashMap<Locator, u32>,
	find_errors: HashSet<Locator>,
	link_batches: VecDeque<Vec<Option<String>>>,
	batches_served: usize,
	hrefs: HashMap<ElementRef, Option<String>>,
	failing_urls: HashSet<String>,
	fail_quit: bool,
	launches: usize,
	calls: Vec<Call>,
}

/// Browser double whose clones share one recorded state.
#[derive(Debug, Clone, Default)]
pub struct FakeBrowser {
	state: Arc<Mutex<FakeState>>,
}

impl FakeBrowser {
	pub fn new() -> Self {
		Self::default()
	}

	fn state(&self) -> MutexGuard<'_, FakeState> {
		self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
	}

	/// Makes `locator` present from the first lookup.
	pub fn with_element(self, locator: &Locator) -> Self {
		self.with_element_after(locator, 0)
	}

	/// Makes `locator` present after `misses` unsuccessful lookups.
	pub fn with_element_after(self, locator: &Locator, misses: u32) -> Self {
		self.state().elements.insert(locator.clone(), misses);
		self
	}

	/// Makes every lookup of `locator` fail with a driver error.
	pub fn with_find_error(self, locator: &Locator) -> Self {
		self.state().find_errors.insert(locator.clone());
		self
	}

	/// Username, password and submit controls of the login page.
	pub fn with_login_form(self) -> Self {
		self.with_element(&site::username_field())
			.with_element(&site::password_field())
			.with_element(&site::login_button())
	}

	/// Queues the anchors returned by the next `find_all`.
	pub fn with_links(self, hrefs: &[&str]) -> Self {
		self.with_link_batch(hrefs.iter().map(|href| Some(href.to_string())).collect())
	}

	/// Queues a batch where `None` is an anchor without `href`.
	pub fn with_link_batch(self, hrefs: Vec<Option<String>>) -> Self {
		self.state().link_batches.push_back(hrefs);
		self
	}

	/// Makes the download trigger for `url` raise a script error.
	pub fn with_failing_download(self, url: &str) -> Self {
		self.state().failing_urls.insert(url.to_string());
		self
	}

	pub fn with_failing_quit(self) -> Self {
		self.state().fail_quit = true;
		self
	}

	pub fn calls(&self) -> Vec<Call> {
		self.state().calls.clone()
	}

	pub fn quit_count(&self) -> usize {
		self.state().calls.iter().filter(|call| matches!(call, Call::Quit)).count()
	}

	pub fn launch_count(&self) -> usize {
		self.state().launches
	}

	pub fn find_all_count(&self) -> usize {
		self.state().calls.iter().filter(|call| matches!(call, Call::FindAll(_))).count()
	}

	pub fn visited(&self) -> Vec<String> {
		self.state()
			.calls
			.iter()
			.filter_map(|call| match call {
				Call::Goto(url) => Some(url.clone()),
				_ => None,
			})
			.collect()
	}

	/// First argument of every executed script, in order.
	pub fn triggered_urls(&self) -> Vec<String> {
		self.state()
			.calls
			.iter()
			.filter_map(|call| match call {
				Call::Execute(args) => args.first().and_then(Value::as_str).map(str::to_string),
				_ => None,
			})
			.collect()
	}
}

fn driver_error(code: &str, message: impl Into<String>) -> RuntimeError {
	RuntimeError::WebDriver {
		code: code.to_string(),
		message: message.into(),
	}
}

#[async_trait]
impl Browser for FakeBrowser {
	async fn goto(&mut self, url: &str) -> DriverResult<()> {
		self.state().calls.push(Call::Goto(url.to_string()));
		Ok(())
	}

	async fn find(&mut self, locator: &Locator) -> DriverResult<Option<ElementRef>> {
		let mut state = self.state();
		state.calls.push(Call::Find(locator.clone()));

		if state.find_errors.contains(locator) {
			return Err(driver_error("unknown error", format!("lookup of {locator} failed")));
		}

		match state.elements.get_mut(locator) {
			Some(0) => Ok(Some(ElementRef::new(locator.to_string()))),
			Some(misses) => {
				*misses -= 1;
				Ok(None)
			}
			None => Ok(None),
		}
	}

	async fn find_all(&mut self, locator: &Locator) -> DriverResult<Vec<ElementRef>> {
		let mut state = self.state();
		state.calls.push(Call::FindAll(locator.clone()));

		let batch = state.link_batches.pop_front().unwrap_or_default();
		let batch_index = state.batches_served;
		state.batches_served += 1;

		// Handles from earlier queries go stale once the page re-renders.
		state.hrefs.clear();

		let mut elements = Vec::with_capacity(batch.len());
		for (i, href) in batch.into_iter().enumerate() {
			let element = ElementRef::new(format!("link-{batch_index}-{i}"));
			state.hrefs.insert(element.clone(), href);
			elements.push(element);
		}
		Ok(elements)
	}

	async fn property(&mut self, element: &ElementRef, name: &str) -> DriverResult<Option<String>> {
		let mut state = self.state();
		state.calls.push(Call::Property(element.clone(), name.to_string()));

		match state.hrefs.get(element) {
			Some(href) if name == "href" => Ok(href.clone()),
			Some(_) => Ok(None),
			None => Err(driver_error(error_codes::STALE_ELEMENT_REFERENCE, format!("{} is no longer attached", element.id()))),
		}
	}

	async fn send_keys(&mut self, element: &ElementRef, text: &str) -> DriverResult<()> {
		self.state().calls.push(Call::SendKeys(element.clone(), text.to_string()));
		Ok(())
	}

	async fn click(&mut self, element: &ElementRef) -> DriverResult<()> {
		self.state().calls.push(Call::Click(element.clone()));
		Ok(())
	}

	async fn execute(&mut self, _script: &str, args: Vec<Value>) -> DriverResult<Value> {
		let mut state = self.state();
		state.calls.push(Call::Execute(args.clone()));

		let url = args.first().and_then(Value::as_str).unwrap_or_default();
		if state.failing_urls.contains(url) {
			return Err(driver_error(error_codes::JAVASCRIPT_ERROR, format!("navigation to {url} was blocked")));
		}
		Ok(Value::Null)
	}

	async fn quit(&mut self) -> DriverResult<()> {
		let mut state = self.state();
		state.calls.push(Call::Quit);
		if state.fail_quit {
			return Err(driver_error(error_codes::INVALID_SESSION_ID, "session already gone"));
		}
		Ok(())
	}
}

/// Launcher handing out clones of one [`FakeBrowser`], or failing every launch.
#[derive(Debug, Clone)]
pub struct FakeLauncher {
	browser: FakeBrowser,
	fail: bool,
}

impl FakeLauncher {
	pub fn new(browser: FakeBrowser) -> Self {
		Self { browser, fail: false }
	}

	/// A launcher whose driver is never found.
	pub fn failing(browser: FakeBrowser) -> Self {
		Self { browser, fail: true }
	}
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
	async fn launch(&self, browser: BrowserKind) -> DriverResult<Box<dyn Browser>> {
		self.browser.state().launches += 1;
		if self.fail {
			return Err(RuntimeError::DriverNotFound {
				browser,
				binary: browser.driver_binary(),
			});
		}
		Ok(Box::new(self.browser.clone()))
	}
}
