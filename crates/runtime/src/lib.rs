//! WebDriver driver lifecycle and connection.
//!
//! Starts the vendor driver server for a [`BrowserKind`](projekt_protocol::BrowserKind),
//! waits for it to report ready, and issues W3C WebDriver commands over HTTP.

pub mod connection;
pub mod driver;
pub mod error;
pub mod process;

pub use connection::{WebDriverConnection, WebDriverSession};
pub use driver::{DriverProcess, find_driver_executable};
pub use error::{Result, RuntimeError};
