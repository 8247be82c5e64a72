//! Command request bodies.

use serde::Serialize;
use serde_json::Value;

use crate::types::LocatorStrategy;

/// Body of `POST /session/{id}/url`.
#[derive(Debug, Clone, Serialize)]
pub struct NavigateTo {
	pub url: String,
}

/// Body of `POST /session/{id}/element` and `/elements`.
#[derive(Debug, Clone, Serialize)]
pub struct FindElement {
	pub using: LocatorStrategy,
	pub value: String,
}

/// Body of `POST /session/{id}/element/{element}/value`.
#[derive(Debug, Clone, Serialize)]
pub struct ElementSendKeys {
	pub text: String,
}

/// Body of `POST /session/{id}/execute/sync`.
#[derive(Debug, Clone, Serialize)]
pub struct ExecuteScript {
	pub script: String,
	pub args: Vec<Value>,
}
