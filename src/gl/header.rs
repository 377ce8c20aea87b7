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
use crate::config::profile::LedgerProfile;
use crate::gl::cell::Cell;
use crate::gl::errors::ConfigError;
use serde::Serialize;

/// Column names of the ledger, in order. Every row is interpreted by
/// position against this list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Header {
	columns: Vec<String>,
}

impl Header {
	pub fn new(columns: Vec<String>) -> Self {
		Self {
			columns: columns.into_iter().map(|c| c.trim().to_string()).collect(),
		}
	}

	pub fn len(&self) -> usize {
		self.columns.len()
	}

	pub fn columns(&self) -> &[String] {
		&self.columns
	}

	/// Exact-name lookup.
	pub fn index_of(&self, name: &str) -> Option<usize> {
		self.columns.iter().position(|c| c == name)
	}

	fn require(&self, name: &str) -> Result<usize, ConfigError> {
		self.index_of(name).ok_or_else(|| ConfigError::MissingColumn {
			column: name.to_string(),
			available: self.columns.join(", "),
		})
	}
}

/// A single ledger entry. `line` is the 1-based line of the source table,
/// the header being line 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LedgerRow {
	pub line: usize,
	pub cells: Vec<Cell>,
}

impl LedgerRow {
	/// Builds a row with exactly `width` cells, padding with empty cells or
	/// dropping extras.
	pub fn new(line: usize, mut cells: Vec<Cell>, width: usize) -> Self {
		if cells.len() != width {
			tracing::debug!(
				"line {} has {} cells, header has {}",
				line,
				cells.len(),
				width
			);
			cells.resize(width, Cell::Empty);
		}

		Self { line, cells }
	}

	pub fn get(&self, index: usize) -> &Cell {
		self.cells.get(index).unwrap_or(&Cell::Empty)
	}
}

/// Positions of every column a rebuild reads, resolved by name once per
/// rebuild.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Columns {
	pub account: usize,
	pub fund: usize,
	pub debit: usize,
	pub credit: usize,
	pub date: Option<usize>,
}

impl Columns {
	/// Fails on the first required column that is absent. The date column
	/// is optional; without it rows keep their ledger order.
	pub fn resolve(
		header: &Header,
		profile: &LedgerProfile,
	) -> Result<Columns, ConfigError> {
		let columns = Columns {
			account: header.require(&profile.account_column)?,
			fund: header.require(&profile.fund_column)?,
			debit: header.require(&profile.debit_column)?,
			credit: header.require(&profile.credit_column)?,
			date: header.index_of(&profile.date_column),
		};

		if columns.date.is_none() {
			tracing::warn!(
				"no '{}' column; reports keep ledger order",
				profile.date_column
			);
		}

		Ok(columns)
	}
}
