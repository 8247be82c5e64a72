//! Interactive collection of run settings.
//!
//! Values given on the command line (or through the environment) are used as
//! is; everything else is prompted for, re-asking until the answer is valid.
//! Nothing collected here is written anywhere.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::bail;
use colored::Colorize;
use projekt::{BrowserKind, ConfigError, Credentials, SessionConfig, TeamId, parse_delay_secs};
use thiserror::Error;

use crate::cli::Cli;

const DELAY_ADVICE: &str = "The next answer matters: every download needs time to start before the next one is opened. \
On a slow connection choose a longer wait, on a fast one a shorter wait. 30 seconds is a safe default.";

#[derive(Debug, Error)]
pub enum ValidationError {
	#[error("Please provide a non-empty answer.")]
	Empty,

	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error("Unknown browser `{0}`; choose one of chrome, edge, firefox, safari.")]
	UnknownBrowser(String),
}

/// Whether an answer is echoed while typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Echo {
	Visible,
	Hidden,
}

/// Line-oriented question and answer over any reader and writer.
pub struct Prompter<R, W> {
	input: R,
	output: W,
	hide_secrets: bool,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
	/// Prompts on the controlling terminal; hidden answers are read without echo.
	pub fn terminal() -> Self {
		Self {
			input: io::stdin().lock(),
			output: io::stdout(),
			hide_secrets: true,
		}
	}
}

impl<R: BufRead, W: Write> Prompter<R, W> {
	/// Prompter that reads every answer, hidden or not, from `input`.
	pub fn new(input: R, output: W) -> Self {
		Self {
			input,
			output,
			hide_secrets: false,
		}
	}

	pub fn into_output(self) -> W {
		self.output
	}

	pub fn say(&mut self, message: impl std::fmt::Display) -> anyhow::Result<()> {
		writeln!(self.output, "{message}")?;
		Ok(())
	}

	fn read_answer(&mut self, prompt: &str, echo: Echo) -> anyhow::Result<String> {
		if echo == Echo::Hidden && self.hide_secrets {
			self.output.flush()?;
			return Ok(rpassword::prompt_password(prompt)?);
		}

		write!(self.output, "{prompt}")?;
		self.output.flush()?;

		let mut line = String::new();
		if self.input.read_line(&mut line)? == 0 {
			bail!("input closed before the question was answered");
		}
		Ok(line.trim_end_matches(['\r', '\n']).to_string())
	}

	/// Asks `prompt` until `validate` accepts the answer.
	pub fn ask_until<T>(&mut self, prompt: &str, echo: Echo, validate: impl Fn(&str) -> Result<T, ValidationError>) -> anyhow::Result<T> {
		loop {
			let answer = self.read_answer(prompt, echo)?;
			match validate(&answer) {
				Ok(value) => return Ok(value),
				Err(e) => writeln!(self.output, "{}", e.to_string().red())?,
			}
		}
	}

	/// True only for an answer of `yes`, in any case.
	pub fn confirm(&mut self, prompt: &str) -> anyhow::Result<bool> {
		let answer = self.ask_until(prompt, Echo::Visible, non_empty)?;
		Ok(answer.eq_ignore_ascii_case("yes"))
	}
}

pub fn non_empty(answer: &str) -> Result<String, ValidationError> {
	if answer.trim().is_empty() {
		return Err(ValidationError::Empty);
	}
	Ok(answer.to_string())
}

pub fn team_answer(answer: &str) -> Result<TeamId, ValidationError> {
	match TeamId::parse(answer) {
		Ok(team) => Ok(team),
		Err(ConfigError::Empty(_)) => Err(ValidationError::Empty),
		Err(e) => Err(e.into()),
	}
}

pub fn delay_answer(answer: &str) -> Result<Duration, ValidationError> {
	if answer.trim().is_empty() {
		return Err(ValidationError::Empty);
	}
	Ok(parse_delay_secs(answer)?)
}

pub fn browser_answer(answer: &str) -> Result<BrowserKind, ValidationError> {
	if answer.trim().is_empty() {
		return Err(ValidationError::Empty);
	}
	answer.parse().map_err(|_| ValidationError::UnknownBrowser(answer.trim().to_string()))
}

/// Builds the run configuration from `cli`, prompting for whatever is missing.
///
/// Returns `None` when the operator declines the delay confirmation.
pub fn gather<R: BufRead, W: Write>(cli: &Cli, prompter: &mut Prompter<R, W>) -> anyhow::Result<Option<SessionConfig>> {
	if !cli.is_complete() {
		prompter.say("Information required to run (never stored):".blue())?;
	}

	let team = match &cli.team {
		Some(raw) => TeamId::parse(raw)?,
		None => prompter.ask_until("What is your team name (e.g. ics4u-40-buckland): ", Echo::Visible, team_answer)?,
	};

	let email = match &cli.email {
		Some(email) => email.clone(),
		None => prompter.ask_until("Enter your email: ", Echo::Visible, non_empty)?,
	};

	let password = match &cli.password {
		Some(password) => password.clone(),
		None => prompter.ask_until("Enter your password: ", Echo::Hidden, non_empty)?,
	};
	let credentials = Credentials::new(email, password)?;

	let delay = match cli.delay {
		Some(delay) => delay,
		None => {
			prompter.say(format!("\n{}", DELAY_ADVICE.red()))?;
			let delay = prompter.ask_until(
				"How long should we wait between project downloads (number of seconds): ",
				Echo::Visible,
				delay_answer,
			)?;

			if !cli.yes {
				let question = format!(
					"Are you sure you want to wait {} seconds between project downloads? (yes/no): ",
					delay.as_secs_f64().to_string().blue()
				);
				if !prompter.confirm(&question)? {
					prompter.say("\nPlease restart the program and enter the wait you want.".red())?;
					return Ok(None);
				}
			}
			delay
		}
	};

	let browser = match cli.browser {
		Some(browser) => browser,
		None => prompter.ask_until(
			&format!(
				"Which browser should be used: {} (only Chrome is fully supported): ",
				"chrome, edge, firefox, safari".blue()
			),
			Echo::Visible,
			browser_answer,
		)?,
	};

	Ok(Some(SessionConfig::new(team, credentials, delay, browser)?))
}
