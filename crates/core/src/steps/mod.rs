//! The three browser-driven stages of an archive run, in order.

pub mod auth;
pub mod discover;
pub mod download;

pub use auth::authenticate;
pub use discover::{DiscoveredLink, discover};
pub use download::{DownloadFailure, DownloadJob, DownloadReport, download_all};
