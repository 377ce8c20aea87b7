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
use thiserror::Error;

/// Problems with the ledger layout or the configuration. Any of these stops
/// a rebuild before a single report is produced.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("Required column '{column}' not found in ledger (columns: {available})")]
	MissingColumn { column: String, available: String },

	#[error("No profile named '{0}' in config")]
	UnknownProfile(String),

	#[error("Invalid summary group pattern '{pattern}': {source}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},
}
