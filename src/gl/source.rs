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
use crate::gl::header::{Header, LedgerRow};
use anyhow::Error;

/// Where ledger rows come from. Implementations hand out the header and the
/// data rows (header excluded); rows must already match the header's width.
pub trait LedgerSource {
	fn header(&self) -> Result<Header, Error>;
	fn rows(&self) -> Result<Vec<LedgerRow>, Error>;
}

/// A ledger fully loaded into memory.
#[derive(Debug)]
pub struct LedgerTable {
	header: Header,
	rows: Vec<LedgerRow>,
}

impl LedgerTable {
	pub fn new(header: Header, rows: Vec<LedgerRow>) -> Self {
		Self { header, rows }
	}

	/// Builds a table from raw strings; line numbers start at 2.
	#[cfg(test)]
	pub fn from_raw(header: &[&str], rows: &[Vec<&str>]) -> Self {
		let header =
			Header::new(header.iter().map(|s| s.to_string()).collect());
		let rows = rows
			.iter()
			.enumerate()
			.map(|(i, raw)| {
				LedgerRow::new(
					i + 2,
					raw.iter().map(|s| crate::gl::cell::Cell::from_raw(s)).collect(),
					header.len(),
				)
			})
			.collect();

		Self { header, rows }
	}
}

impl LedgerSource for LedgerTable {
	fn header(&self) -> Result<Header, Error> {
		Ok(self.header.clone())
	}

	fn rows(&self) -> Result<Vec<LedgerRow>, Error> {
		Ok(self.rows.clone())
	}
}
