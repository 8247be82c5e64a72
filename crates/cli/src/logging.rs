use tracing_subscriber::EnvFilter;

/// Default filter for a `-v` count, used when `RUST_LOG` is unset.
pub fn default_filter(verbose: u8) -> &'static str {
	match verbose {
		0 => "warn,projekt=info,projekt_cli=info,projekt_runtime=warn",
		1 => "warn,projekt=debug,projekt_cli=debug,projekt_runtime=debug",
		2 => "info,projekt=trace,projekt_cli=trace,projekt_runtime=trace",
		_ => "trace",
	}
}

/// Installs the global subscriber. Logs go to stderr; stdout carries prompts
/// and the run summary.
pub fn init_logging(verbose: u8) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(verbose > 1)
		.init();
}
