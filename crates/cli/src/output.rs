//! Run summary rendering.

use std::io::Write;

use clap::ValueEnum;
use colored::Colorize;
use projekt::RunReport;

/// Output format for the run summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text
	#[default]
	Text,
	/// JSON report on stdout
	Json,
}

impl std::fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			OutputFormat::Text => write!(f, "text"),
			OutputFormat::Json => write!(f, "json"),
		}
	}
}

/// Script that sorts the downloaded archives using the manifest.
pub const SORTER_SCRIPT: &str = "projectSorter.sh";

pub fn render_text(report: &RunReport) -> String {
	let mut out = String::new();

	if report.no_projects {
		out.push_str(&format!("{}\n", format!("No projects found for team {}.", report.team).yellow()));
	} else {
		out.push_str(&format!("Projects found:      {}\n", report.links.len()));
		out.push_str(&format!("Downloads triggered: {}\n", report.downloads.triggered.to_string().green()));
	}

	if !report.downloads.failures.is_empty() {
		out.push_str(&format!("Failed triggers:     {}\n", report.downloads.failures.len().to_string().red()));
		for failure in &report.downloads.failures {
			out.push_str(&format!("  {} {}\n", failure.url.red(), failure.error.dimmed()));
		}
	}

	out.push_str(&format!(
		"Manifest:            {} ({} entries)\n",
		report.manifest_path.display(),
		report.manifest_entries.len()
	));

	if !report.no_projects {
		out.push_str(&format!(
			"\n{}\n",
			format!("When the downloads have finished, run `bash {SORTER_SCRIPT}` to sort the archives.").blue()
		));
	}
	out
}

pub fn write_report(out: &mut impl Write, report: &RunReport, format: OutputFormat) -> anyhow::Result<()> {
	match format {
		OutputFormat::Text => write!(out, "{}", render_text(report))?,
		OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(report)?)?,
	}
	out.flush()?;
	Ok(())
}
