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
use crate::config::config_file::Config;
use crate::gl::source::LedgerTable;
use crate::parsing::csv_source::read_ledger;
use anyhow::{anyhow, bail, Context, Error};
use dirs::home_dir;
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

pub struct Filesystem {
	default_config: Option<PathBuf>,
}

impl Filesystem {
	pub fn new() -> Self {
		Self {
			default_config: home_dir()
				.map(|home| home.join(".config/fundr/config.toml")),
		}
	}

	/// Loads a ledger CSV from disk.
	pub fn open_ledger(
		&self,
		file_path: &str,
		delimiter: u8,
	) -> Result<LedgerTable, Error> {
		let path = Path::new(file_path);
		let file = File::open(path)
			.with_context(|| format!("failed to open ledger {}", file_path))?;
		read_ledger(file, delimiter)
	}

	/// Fetches the config from the given path, or the default path if none.
	/// A missing file at the default path means built-in defaults; a missing
	/// file at an explicit path is an error.
	pub fn get_config(
		&self,
		custom_config_path: Option<&String>,
	) -> Result<Config, Error> {
		let config_path = match custom_config_path {
			Some(p) => PathBuf::from(p),
			None => match &self.default_config {
				Some(p) if p.exists() => p.clone(),
				_ => {
					tracing::debug!("no config file; using defaults");
					return Ok(Config::default());
				},
			},
		};

		if !config_path.exists() {
			bail!("Config file not found: {}", config_path.display());
		}

		let content = fs::read_to_string(&config_path)?;
		let config: Config = toml::from_str(&content)
			.map_err(|e| anyhow!("failed to parse config: {}", e))?;

		tracing::debug!(
			"loaded {} profile(s) from {}",
			config.profiles.len(),
			config_path.display()
		);
		Ok(config)
	}
}
