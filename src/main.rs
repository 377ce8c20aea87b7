/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::gl::rebuild::{rebuild, LoadedLedger, RebuildOutcome, RebuildRequest, Scope};
use crate::gl::report::ReportKind;
use crate::gl::summary::summarize;
use crate::parsing::filesystem::Filesystem;
use crate::reports::check_reporter::CheckReporter;
use crate::reports::csv_renderer::CsvRenderer;
use crate::reports::json_renderer::JsonRenderer;
use crate::reports::renderer::{ReportRenderer, Renderers};
use crate::reports::table_renderer::TableRenderer;
use anyhow::{bail, Error};
use clap::{Parser, ValueEnum};
use std::cmp::PartialEq;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod gl;
mod parsing;
mod reports;
mod util;

#[derive(Parser)]
#[command(
	name = "fundr",
	version,
	about = "Account, fund and summary reports from a tabular ledger"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	/// Rebuild only this account or fund, by name or report identifier
	#[arg(required = false)]
	name: Option<String>,

	// -----------
	// -- FLAGS --
	// -----------
	/// Specifies the ledger CSV file
	#[arg(short)]
	file: String,

	/// Custom config file location (default: ~/.config/fundr/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Ledger profile to use from the config file
	#[arg(short, long)]
	profile: Option<String>,

	/// Output format
	#[arg(long, value_enum, default_value_t = Format::Table)]
	format: Format,

	/// Also write one CSV file per report into this directory
	#[arg(short, long)]
	out_dir: Option<PathBuf>,

	/// Field delimiter of the ledger CSV
	#[arg(long, default_value_t = ',')]
	delimiter: char,

	/// Log debug details to stderr
	#[arg(short, long)]
	verbose: bool,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		if self.name.is_some()
			&& matches!(self.command, Directive::Summary | Directive::Check)
		{
			bail!("A report name only applies to the accounts and funds commands");
		}

		if !self.delimiter.is_ascii() {
			bail!("Delimiter must be a single ASCII character");
		}

		Ok(())
	}

	fn scope(&self) -> Scope {
		match &self.name {
			Some(name) => Scope::Single(name.clone()),
			None => Scope::All,
		}
	}
}

#[derive(ValueEnum, Clone, PartialEq)]
enum Directive {
	Accounts, // one report per account
	Funds,    // one report per fund, revenue and expense rows only
	Summary,  // consolidated fund and account balances
	Check,    // column resolution and unreadable cells
}

#[derive(ValueEnum, Clone, Copy, PartialEq)]
enum Format {
	Table,
	Json,
}

fn main() -> Result<(), Error> {
	let args = Cli::parse();
	init_tracing(args.verbose);
	args.validate()?;

	let fs = Filesystem::new();
	let config = fs.get_config(args.config.as_ref())?;
	let profile = config.profile(args.profile.as_deref())?;
	let ledger = fs.open_ledger(&args.file, args.delimiter as u8)?;

	match args.command {
		Directive::Accounts | Directive::Funds => {
			let kind = if args.command == Directive::Accounts {
				ReportKind::Account
			} else {
				ReportKind::Fund
			};
			let request = RebuildRequest {
				kind,
				scope: args.scope(),
			};
			let mut renderer = renderers(&args, profile.currency.clone());
			rebuild(&ledger, &profile, &request, &mut renderer)?;
		},
		Directive::Summary => {
			let summary = summarize(&ledger, &profile)?;
			let mut renderer = renderers(&args, profile.currency.clone());
			renderer.render_summary(&summary)?;
			renderer.complete(&RebuildOutcome {
				produced: vec!["Summary".to_string()],
				not_found: vec![],
				diagnostics: summary.diagnostics,
			})?;
		},
		Directive::Check => {
			let loaded = LoadedLedger::load(&ledger, &profile)?;
			let reporter = CheckReporter::new(&loaded, &profile);
			match args.format {
				Format::Table => print!("{}", reporter.render()),
				Format::Json => {
					println!("{}", serde_json::to_string_pretty(&reporter)?)
				},
			}
		},
	}

	Ok(())
}

fn renderers(args: &Cli, currency: Option<String>) -> Renderers {
	let mut inner: Vec<Box<dyn ReportRenderer>> = vec![match args.format {
		Format::Table => Box::new(TableRenderer::new(io::stdout(), currency)),
		Format::Json => Box::new(JsonRenderer::new(io::stdout())),
	}];

	if let Some(dir) = &args.out_dir {
		inner.push(Box::new(CsvRenderer::new(dir)));
	}

	Renderers::new(inner)
}

fn init_tracing(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.init();
}
