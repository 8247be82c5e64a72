//! Wire types for the W3C WebDriver protocol.
//!
//! This crate contains the serde-serializable types exchanged with a WebDriver
//! server (chromedriver, msedgedriver, geckodriver, safaridriver) over HTTP.
//! These types represent the "protocol layer" - the shapes of data as they
//! appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization/deserialization
//! * 1:1 with protocol: Match the W3C WebDriver command bodies
//! * Minimal: Only the commands the archiver issues are modelled
//!
//! Session lifecycle and HTTP transport live in `projekt-runtime`.

pub mod capabilities;
pub mod commands;
pub mod envelope;
pub mod types;

pub use capabilities::*;
pub use commands::*;
pub use envelope::*;
pub use types::*;
