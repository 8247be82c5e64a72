pub mod cli;
pub mod intake;
pub mod logging;
pub mod output;

use colored::Colorize;
use projekt::{Archiver, BrowserLauncher, RunReport, SessionConfig, Site, WebDriverLauncher};
use tracing::info;

use crate::cli::Cli;
use crate::intake::Prompter;

/// Builds the launcher selected by the command line.
pub fn launcher(cli: &Cli) -> WebDriverLauncher {
	let launcher = WebDriverLauncher::new().with_headless(cli.headless);
	match &cli.webdriver_url {
		Some(url) => launcher.with_endpoint(url.clone()),
		None => launcher,
	}
}

/// Runs the archiver with the site and manifest location from `cli`.
pub async fn archive<L: BrowserLauncher>(cli: &Cli, config: SessionConfig, launcher: L) -> projekt::Result<RunReport> {
	Archiver::new(launcher)
		.with_site(Site::new(&cli.site))
		.with_manifest_path(&cli.manifest)
		.run(config)
		.await
}

/// Full command: prompt, archive, summarize. Returns the process exit code.
pub async fn run(cli: Cli) -> anyhow::Result<i32> {
	let intake_cli = cli.clone();
	let config = tokio::task::spawn_blocking(move || intake::gather(&intake_cli, &mut Prompter::terminal())).await??;

	let Some(config) = config else {
		info!(target = "projekt", "run cancelled at delay confirmation");
		return Ok(0);
	};

	println!("\n{}", "Starting download process".blue());
	let report = archive(&cli, config, launcher(&cli)).await?;
	output::write_report(&mut std::io::stdout().lock(), &report, cli.format)?;
	Ok(0)
}
