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
use crate::gl::cell::Cell;
use crate::gl::header::{Header, LedgerRow};
use crate::gl::source::LedgerTable;
use anyhow::{anyhow, bail, Context, Error};
use std::borrow::Cow;
use std::io::Read;

/// Reads a ledger exported as CSV. The first record is the header; records
/// may be ragged and are fitted to the header's width. Bytes that are not
/// valid UTF-8 are replaced rather than rejected, so a Latin-1 export still
/// loads.
pub fn read_ledger<R: Read>(
	mut reader: R,
	delimiter: u8,
) -> Result<LedgerTable, Error> {
	let mut data = Vec::new();
	reader
		.read_to_end(&mut data)
		.context("failed to read ledger")?;
	let lines = LineIndex::new(&data);

	let mut reader = csv::ReaderBuilder::new()
		.has_headers(false)
		.flexible(true)
		.delimiter(delimiter)
		.from_reader(data.as_slice());

	let mut records = reader.byte_records();

	let header_record = match records.next() {
		Some(record) => record.context("failed to read ledger header")?,
		None => bail!("Ledger is empty; expected a header row"),
	};
	let header = Header::new(
		header_record
			.iter()
			.map(|field| decode(field).into_owned())
			.collect(),
	);

	let mut rows = Vec::new();
	for (i, record) in records.enumerate() {
		let record = record.map_err(|e| anyhow!("malformed ledger row: {}", e))?;
		let line = record
			.position()
			.map_or(i + 2, |p| lines.line_at(p.byte() as usize));

		let fields: Vec<Cow<str>> = record.iter().map(decode).collect();

		// rows made only of separators are blank lines in the sheet
		if fields.iter().all(|field| field.trim().is_empty()) {
			continue;
		}

		if fields.iter().any(|field| matches!(field, Cow::Owned(_))) {
			tracing::debug!("line {}: invalid UTF-8 replaced", line);
		}

		let cells = fields.iter().map(|field| Cell::from_raw(field)).collect();
		rows.push(LedgerRow::new(line, cells, header.len()));
	}

	tracing::debug!(
		"read {} ledger rows across {} columns",
		rows.len(),
		header.len()
	);

	Ok(LedgerTable::new(header, rows))
}

fn decode(field: &[u8]) -> Cow<str> {
	String::from_utf8_lossy(field)
}

/// Maps byte offsets of the input to 1-based physical line numbers.
struct LineIndex<'a> {
	data: &'a [u8],
	newlines: Vec<usize>,
}

impl<'a> LineIndex<'a> {
	fn new(data: &'a [u8]) -> Self {
		Self {
			data,
			newlines: data
				.iter()
				.enumerate()
				.filter(|(_, b)| **b == b'\n')
				.map(|(i, _)| i)
				.collect(),
		}
	}

	/// A record's position can point at blank lines the reader skipped
	/// before it; those are stepped over to reach the record itself.
	fn line_at(&self, byte: usize) -> usize {
		let mut start = byte.min(self.data.len());
		while matches!(self.data.get(start), Some(b'\r' | b'\n')) {
			start += 1;
		}
		self.newlines.partition_point(|&nl| nl < start) + 1
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::gl::source::LedgerSource;

	#[test]
	fn test_read_ledger() {
		let data = "\
Date,Account,Funds,Debit,Credit
01/01/24,Expenses,Grants,\"1,000\",
,,,,

02/01/24,Revenues,Grants,,250,extra
03/01/24,Bank
";
		let table = read_ledger(data.as_bytes(), b',').unwrap();
		let header = table.header().unwrap();
		assert_eq!(header.columns()[4], "Credit");

		let rows = table.rows().unwrap();
		assert_eq!(rows.len(), 3);
		assert_eq!(rows[0].line, 2);
		assert_eq!(rows[0].get(3), &Cell::Text("1,000".to_string()));
		assert_eq!(rows[1].line, 5);
		assert_eq!(rows[1].cells.len(), 5);
		assert_eq!(rows[2].get(4), &Cell::Empty);
	}

	#[test]
	fn test_semicolon_delimiter() {
		let data = "Account;Debit\nBank;12,5\n";
		let table = read_ledger(data.as_bytes(), b';').unwrap();
		let rows = table.rows().unwrap();
		assert_eq!(rows[0].get(1), &Cell::Text("12,5".to_string()));
	}

	#[test]
	fn test_lines_after_blank_lines() {
		let data = "Account,Debit\r\nBank,1\r\n\r\n\r\nCash,2\r\nx\r\ny,3\r\n";
		let table = read_ledger(data.as_bytes(), b',').unwrap();
		let lines: Vec<usize> =
			table.rows().unwrap().iter().map(|r| r.line).collect();
		assert_eq!(lines, vec![2, 5, 6, 7]);
	}

	#[test]
	fn test_invalid_utf8_is_replaced() {
		let data: &[u8] =
			b"Account,Description,Debit\nBank,caf\xe9 cr\xe8me,12\nCash,ok,3\n";
		let table = read_ledger(data, b',').unwrap();
		let rows = table.rows().unwrap();
		assert_eq!(rows.len(), 2);
		assert_eq!(rows[0].get(0), &Cell::from_raw("Bank"));
		assert_eq!(rows[0].get(1).to_string(), "caf\u{FFFD} cr\u{FFFD}me");
		assert_eq!(rows[0].get(2), &Cell::from_raw("12"));
		assert_eq!(rows[1].line, 3);
	}

	#[test]
	fn test_empty_input() {
		assert!(read_ledger("".as_bytes(), b',').is_err());
	}
}
