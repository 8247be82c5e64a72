//! Login form submission.

use tracing::{debug, info};

use crate::browser::{Browser, ElementRef, Locator};
use crate::config::Credentials;
use crate::error::{Error, Result, Step, StepContext};
use crate::site::{self, AUTH_TIMEOUT, Site};
use crate::wait::wait_for;

async fn require(browser: &mut dyn Browser, locator: &Locator) -> Result<ElementRef> {
	browser
		.find(locator)
		.await
		.in_step(Step::Authenticate)?
		.ok_or_else(|| Error::ElementMissing {
			step: Step::Authenticate,
			locator: locator.to_string(),
		})
}

/// Logs in and waits for the home landmark.
///
/// A landmark that never renders (wrong credentials, captcha, slow site) is
/// [`Error::AuthTimeout`]; there is no retry.
pub async fn authenticate(browser: &mut dyn Browser, site: &Site, credentials: &Credentials) -> Result<()> {
	let login_url = site.login_url();
	info!(target = "projekt.auth", url = %login_url, "opening login page");
	browser.goto(&login_url).await.in_step(Step::Authenticate)?;

	let username = require(browser, &site::username_field()).await?;
	let password = require(browser, &site::password_field()).await?;
	let submit = require(browser, &site::login_button()).await?;

	browser.send_keys(&username, credentials.email()).await.in_step(Step::Authenticate)?;
	browser.send_keys(&password, credentials.password()).await.in_step(Step::Authenticate)?;
	browser.click(&submit).await.in_step(Step::Authenticate)?;
	debug!(target = "projekt.auth", "credentials submitted");

	let landmark = site::home_landmark();
	match wait_for(&landmark, Step::Authenticate).with_timeout(AUTH_TIMEOUT).until_located(browser).await {
		Ok(_) => {
			info!(target = "projekt.auth", "logged in");
			Ok(())
		}
		Err(Error::WaitTimeout { locator, timeout }) => Err(Error::AuthTimeout { landmark: locator, timeout }),
		Err(e) => Err(e),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{Call, FakeBrowser};

	fn credentials() -> Credentials {
		Credentials::new("me@example.com", "hunter2").unwrap()
	}

	#[tokio::test(start_paused = true)]
	async fn fills_form_and_waits_for_landmark() {
		let mut browser = FakeBrowser::new().with_login_form().with_element_after(&site::home_landmark(), 4);

		authenticate(&mut browser, &Site::default(), &credentials()).await.unwrap();

		assert_eq!(browser.visited(), vec!["https://replit.com/login"]);
		let calls = browser.calls();
		let typed: Vec<_> = calls
			.iter()
			.filter_map(|call| match call {
				Call::SendKeys(element, text) => Some((element.id().to_string(), text.clone())),
				_ => None,
			})
			.collect();
		assert_eq!(
			typed,
			vec![
				(site::username_field().to_string(), "me@example.com".to_string()),
				(site::password_field().to_string(), "hunter2".to_string()),
			]
		);
		assert!(calls.contains(&Call::Click(ElementRef::new(site::login_button().to_string()))));
	}

	#[tokio::test(start_paused = true)]
	async fn missing_landmark_is_auth_timeout() {
		let mut browser = FakeBrowser::new().with_login_form();
		let start = tokio::time::Instant::now();

		let err = authenticate(&mut browser, &Site::default(), &credentials()).await.unwrap_err();

		assert!(matches!(err, Error::AuthTimeout { timeout, .. } if timeout == AUTH_TIMEOUT));
		assert!(start.elapsed() >= AUTH_TIMEOUT);
	}

	#[tokio::test]
	async fn missing_form_field_fails_before_typing() {
		let mut browser = FakeBrowser::new().with_element(&site::username_field());

		let err = authenticate(&mut browser, &Site::default(), &credentials()).await.unwrap_err();

		assert!(matches!(err, Error::ElementMissing { step: Step::Authenticate, ref locator } if locator.contains("password")));
		assert!(!browser.calls().iter().any(|call| matches!(call, Call::SendKeys(..))));
	}
}
