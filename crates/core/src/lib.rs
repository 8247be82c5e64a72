//! Team project archiver.
//!
//! Logs into the hosting site in a real browser, collects the project links of
//! one team and triggers each project's archive download, one at a time with a
//! fixed pause between triggers. Finally writes a `.projekts` manifest naming
//! the archive file of every discovered project.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use projekt::{Archiver, BrowserKind, Credentials, SessionConfig, TeamId, WebDriverLauncher};
//!
//! let config = SessionConfig::new(
//!     TeamId::parse("acme")?,
//!     Credentials::new("me@example.com", "secret")?,
//!     Duration::from_secs(30),
//!     BrowserKind::Chrome,
//! )?;
//! let report = Archiver::new(WebDriverLauncher::new()).run(config).await?;
//! println!("{} archives requested", report.downloads.triggered);
//! ```

pub mod archiver;
pub mod browser;
pub mod config;
pub mod error;
pub mod manifest;
pub mod session;
pub mod site;
pub mod steps;
pub mod wait;
pub mod webdriver;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use archiver::{Archiver, RunReport};
pub use browser::{Browser, BrowserLauncher, ElementRef, Locator};
pub use config::{ConfigError, Credentials, SessionConfig, TeamId, parse_delay_secs};
pub use error::{Error, Result, Step};
pub use manifest::{manifest_entries, manifest_entry, write_manifest};
pub use projekt_protocol::BrowserKind;
pub use session::{SessionHandle, SessionManager};
pub use site::Site;
pub use steps::{DiscoveredLink, DownloadFailure, DownloadJob, DownloadReport};
pub use webdriver::{WebDriverBrowser, WebDriverLauncher};
