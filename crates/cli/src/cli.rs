use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use projekt::BrowserKind;
use projekt::site::{DEFAULT_MANIFEST_FILE, DEFAULT_ORIGIN};

use crate::output::OutputFormat;

/// Anything left out is asked for on the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "projekt")]
#[command(about = "Download the archive of every project in a Replit team")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v debug, -vv trace)
	#[arg(short, long, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Team name as it appears in replit.com/team/<name>
	#[arg(long, env = "PROJEKT_TEAM", value_name = "NAME")]
	pub team: Option<String>,

	/// Login email
	#[arg(long, env = "PROJEKT_EMAIL")]
	pub email: Option<String>,

	/// Login password (prefer the prompt or PROJEKT_PASSWORD)
	#[arg(long, env = "PROJEKT_PASSWORD", hide_env_values = true)]
	pub password: Option<String>,

	/// Seconds to wait after each download trigger; slow connections need more
	#[arg(long, value_name = "SECS", value_parser = parse_delay)]
	pub delay: Option<Duration>,

	/// Browser to drive: chrome, edge, firefox or safari
	#[arg(short, long, value_parser = parse_browser)]
	pub browser: Option<BrowserKind>,

	/// Run the browser without a window (not supported by Safari)
	#[arg(long)]
	pub headless: bool,

	/// Use a running WebDriver server instead of starting the browser's driver
	#[arg(long, value_name = "URL")]
	pub webdriver_url: Option<String>,

	/// Site origin
	#[arg(long, value_name = "URL", default_value = DEFAULT_ORIGIN)]
	pub site: String,

	/// Where to write the archive manifest
	#[arg(long, value_name = "FILE", default_value = DEFAULT_MANIFEST_FILE)]
	pub manifest: PathBuf,

	/// Skip the delay confirmation
	#[arg(short, long)]
	pub yes: bool,

	/// Summary format
	#[arg(long, value_enum, default_value_t)]
	pub format: OutputFormat,
}

fn parse_delay(raw: &str) -> Result<Duration, projekt::ConfigError> {
	projekt::parse_delay_secs(raw)
}

fn parse_browser(raw: &str) -> Result<BrowserKind, String> {
	raw.parse()
}

impl Cli {
	/// True when every run setting was given up front.
	pub fn is_complete(&self) -> bool {
		self.team.is_some() && self.email.is_some() && self.password.is_some() && self.delay.is_some() && self.browser.is_some()
	}
}
