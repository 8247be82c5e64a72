//! HTTP connection to a WebDriver server.
//!
//! [`WebDriverConnection`] talks to the server root (status, new session);
//! [`WebDriverSession`] scopes commands to one `/session/{id}`. Responses are
//! unwrapped from the `{ "value": ... }` envelope and non-2xx bodies are
//! decoded into [`RuntimeError::WebDriver`].

use std::time::Duration;

use projekt_protocol::{
	DriverStatus, ElementSendKeys, ErrorValue, ExecuteScript, FindElement, LocatorStrategy, NavigateTo, NewSessionRequest, NewSessionResponse,
	ValueEnvelope, WebElement,
};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, trace};

use crate::error::{Result, RuntimeError};

/// Default per-command HTTP timeout. Navigation commands block until load.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection to a WebDriver server root.
#[derive(Debug, Clone)]
pub struct WebDriverConnection {
	client: reqwest::Client,
	endpoint: String,
}

impl WebDriverConnection {
	pub fn new(endpoint: &str) -> Result<Self> {
		Self::with_timeout(endpoint, COMMAND_TIMEOUT)
	}

	/// Creates a connection whose requests fail after `timeout`.
	pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self> {
		let endpoint = endpoint.trim_end_matches('/').to_string();
		let client = reqwest::Client::builder().timeout(timeout).build().map_err(|source| RuntimeError::Http {
			url: endpoint.clone(),
			source,
		})?;
		Ok(Self { client, endpoint })
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	/// Queries `GET /status`.
	pub async fn status(&self) -> Result<DriverStatus> {
		self.request(Method::GET, "/status", None::<&Value>).await
	}

	/// Creates a browser session with the given capabilities.
	pub async fn new_session(&self, request: &NewSessionRequest) -> Result<WebDriverSession> {
		let response: NewSessionResponse = self.request(Method::POST, "/session", Some(request)).await?;
		debug!(
			target = "projekt.runtime",
			session = %response.session_id,
			browser = %response.capabilities["browserName"],
			version = %response.capabilities["browserVersion"],
			"webdriver session created"
		);
		Ok(WebDriverSession {
			connection: self.clone(),
			id: response.session_id,
		})
	}

	async fn request<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
	where
		B: Serialize + ?Sized,
		T: DeserializeOwned,
	{
		let url = format!("{}{}", self.endpoint, path);
		let mut builder = self.client.request(method.clone(), &url);
		if let Some(body) = body {
			builder = builder.json(body);
		}

		let response = builder.send().await.map_err(|source| RuntimeError::Http { url: url.clone(), source })?;
		let status = response.status();
		let text = response.text().await.map_err(|source| RuntimeError::Http { url: url.clone(), source })?;
		trace!(target = "projekt.runtime", %method, %url, %status, "webdriver response");

		decode_response(status.is_success(), &text)
	}
}

fn decode_response<T: DeserializeOwned>(success: bool, body: &str) -> Result<T> {
	if !success {
		return Err(match serde_json::from_str::<ValueEnvelope<ErrorValue>>(body) {
			Ok(envelope) => RuntimeError::WebDriver {
				code: envelope.value.error,
				message: envelope.value.message,
			},
			Err(_) => RuntimeError::Protocol(format!("unexpected error response: {body}")),
		});
	}

	serde_json::from_str::<ValueEnvelope<T>>(body)
		.map(|envelope| envelope.value)
		.map_err(|e| RuntimeError::Protocol(format!("failed to decode response: {e}")))
}

/// One live WebDriver session.
#[derive(Debug, Clone)]
pub struct WebDriverSession {
	connection: WebDriverConnection,
	id: String,
}

impl WebDriverSession {
	pub fn id(&self) -> &str {
		&self.id
	}

	fn path(&self, suffix: &str) -> String {
		format!("/session/{}{}", self.id, suffix)
	}

	pub async fn navigate(&self, url: &str) -> Result<()> {
		let body = NavigateTo { url: url.to_string() };
		let _: Value = self.connection.request(Method::POST, &self.path("/url"), Some(&body)).await?;
		Ok(())
	}

	pub async fn find_element(&self, using: LocatorStrategy, value: &str) -> Result<WebElement> {
		let body = FindElement {
			using,
			value: value.to_string(),
		};
		self.connection.request(Method::POST, &self.path("/element"), Some(&body)).await
	}

	pub async fn find_elements(&self, using: LocatorStrategy, value: &str) -> Result<Vec<WebElement>> {
		let body = FindElement {
			using,
			value: value.to_string(),
		};
		self.connection.request(Method::POST, &self.path("/elements"), Some(&body)).await
	}

	/// Reads a DOM property. Unlike the raw attribute, URL properties such as
	/// `href` come back resolved against the document base.
	pub async fn property(&self, element: &WebElement, name: &str) -> Result<Value> {
		let path = self.path(&format!("/element/{}/property/{}", element.id, name));
		self.connection.request(Method::GET, &path, None::<&Value>).await
	}

	pub async fn send_keys(&self, element: &WebElement, text: &str) -> Result<()> {
		let body = ElementSendKeys { text: text.to_string() };
		let path = self.path(&format!("/element/{}/value", element.id));
		let _: Value = self.connection.request(Method::POST, &path, Some(&body)).await?;
		Ok(())
	}

	pub async fn click(&self, element: &WebElement) -> Result<()> {
		let path = self.path(&format!("/element/{}/click", element.id));
		let _: Value = self.connection.request(Method::POST, &path, Some(&json!({}))).await?;
		Ok(())
	}

	/// Runs `script` synchronously in the page; `args` are exposed as `arguments`.
	pub async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value> {
		let body = ExecuteScript {
			script: script.to_string(),
			args,
		};
		self.connection.request(Method::POST, &self.path("/execute/sync"), Some(&body)).await
	}

	/// Ends the session, closing every window it owns.
	pub async fn delete(&self) -> Result<()> {
		let _: Value = self.connection.request(Method::DELETE, &self.path(""), None::<&Value>).await?;
		Ok(())
	}
}
