use clap::Parser;
use projekt_cli::{cli::Cli, logging};
use tracing::{error, warn};

/// Exit status after Ctrl-C.
const INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let code = tokio::select! {
		result = projekt_cli::run(cli) => match result {
			Ok(code) => code,
			Err(err) => {
				error!(target = "projekt", error = %format!("{err:#}"), "run failed");
				1
			}
		},
		_ = tokio::signal::ctrl_c() => {
			warn!(target = "projekt", "interrupted; closing the browser");
			INTERRUPTED
		}
	};

	std::process::exit(code);
}
