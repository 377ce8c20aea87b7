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
use std::fmt::Write;

/// Standard table printer for reports that list many single-line rows, such
/// as per-account and per-fund reports and the summary tables.
///
/// Output is built into a string so it can go to any writer.
pub struct Table {
	column_count: usize,
	rows: Vec<Row>,
	right_align: Vec<bool>, // indicates columns by index
}

pub enum Row {
	Header(Vec<String>),
	Data(Vec<String>),
	Separator,
	PartialSeparator(Vec<bool>), // indicates columns by index
}

impl Table {
	pub fn new(column_count: usize) -> Self {
		Self {
			column_count,
			rows: Vec::new(),
			right_align: vec![false; column_count],
		}
	}

	/// Adds a header row.
	pub fn add_header<S: AsRef<str>>(&mut self, row: &[S]) {
		self.rows.push(Row::Header(self.fit(row)));
	}

	/// Adds a data row. Missing trailing cells are blank.
	pub fn add_row<S: AsRef<str>>(&mut self, row: &[S]) {
		self.rows.push(Row::Data(self.fit(row)));
	}

	/// Adds a full separator row.
	pub fn add_separator(&mut self) {
		self.rows.push(Row::Separator);
	}

	/// Adds a partial separator row for selected columns.
	pub fn add_partial_separator(&mut self, indices: &[usize]) {
		let mut cols = vec![false; self.column_count];
		for i in indices {
			if let Some(col) = cols.get_mut(*i) {
				*col = true;
			}
		}
		self.rows.push(Row::PartialSeparator(cols));
	}

	/// Specifies columns that should be right-aligned by index.
	pub fn right_align(&mut self, cols: &[usize]) {
		for col in cols {
			if let Some(align) = self.right_align.get_mut(*col) {
				*align = true;
			}
		}
	}

	pub fn render(&self) -> String {
		let mut out = String::new();
		let mut max_widths = vec![0; self.column_count];

		// Calculate maximum column widths for proper spacing
		for row in &self.rows {
			if let Row::Data(data_row) | Row::Header(data_row) = row {
				for (i, value) in data_row.iter().enumerate() {
					max_widths[i] = max_widths[i].max(width(value));
				}
			}
		}

		for row in &self.rows {
			match row {
				Row::Header(header_row) => {
					self.render_centered_row(&mut out, &max_widths, header_row, " | ")
				},
				Row::Data(data_row) => {
					self.render_data_row(&mut out, &max_widths, data_row, "   ")
				},
				Row::Separator => self.render_separator(&mut out, &max_widths),
				Row::PartialSeparator(data_sep) => {
					self.render_partial_separator(&mut out, &max_widths, data_sep)
				},
			}
		}

		out
	}

	fn fit<S: AsRef<str>>(&self, row: &[S]) -> Vec<String> {
		let mut cells: Vec<String> = row
			.iter()
			.take(self.column_count)
			.map(|s| s.as_ref().replace(['\n', '\r'], " "))
			.collect();
		cells.resize(self.column_count, String::new());
		cells
	}

	fn render_data_row(
		&self,
		out: &mut String,
		max_widths: &[usize],
		data_row: &[String],
		separator: &str,
	) {
		let mut line = String::new();
		for (i, value) in data_row.iter().enumerate() {
			let padding = " ".repeat(max_widths[i] - width(value));
			if self.right_align[i] {
				line.push_str(&padding);
				line.push_str(value);
			} else {
				line.push_str(value);
				line.push_str(&padding);
			}
			if i < data_row.len() - 1 {
				line.push_str(separator);
			}
		}
		let _ = writeln!(out, "{}", line.trim_end());
	}

	fn render_centered_row(
		&self,
		out: &mut String,
		max_widths: &[usize],
		data_row: &[String],
		separator: &str,
	) {
		let cells: Vec<String> = data_row
			.iter()
			.enumerate()
			.map(|(i, value)| Table::center_align(value, max_widths[i]))
			.collect();
		let _ = writeln!(out, "{}", cells.join(separator).trim_end());
	}

	fn render_separator(&self, out: &mut String, max_widths: &[usize]) {
		let total_width: usize = max_widths.iter().sum::<usize>()
			+ (3 * self.column_count.saturating_sub(1));
		let _ = writeln!(out, "{}", "-".repeat(total_width));
	}

	fn render_partial_separator(
		&self,
		out: &mut String,
		max_widths: &[usize],
		data_sep: &[bool],
	) {
		let cells: Vec<String> = data_sep
			.iter()
			.enumerate()
			.map(|(i, draw)| {
				let fill = if *draw { "-" } else { " " };
				fill.repeat(max_widths[i])
			})
			.collect();
		let _ = writeln!(out, "{}", cells.join("   ").trim_end());
	}

	fn center_align(value: &str, width_to_fill: usize) -> String {
		let value_width = width(value);
		if value_width >= width_to_fill {
			return value.to_string();
		}
		let total_padding = width_to_fill - value_width;
		let left_padding = total_padding / 2;
		let right_padding = total_padding - left_padding;

		format!(
			"{}{}{}",
			" ".repeat(left_padding),
			value,
			" ".repeat(right_padding)
		)
	}
}

fn width(s: &str) -> usize {
	s.chars().count()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_render() {
		let mut table = Table::new(3);
		table.right_align(&[2]);
		table.add_header(&["Date", "Memo", "Debit"]);
		table.add_separator();
		table.add_row(&["2024-01-01", "Rent", "1,000"]);
		table.add_row(&["2024-01-02", "Tea", "5"]);
		table.add_partial_separator(&[2]);
		table.add_row(&["", "TOTALS:", "1,005"]);

		let expected = [
			"   Date    |  Memo   | Debit",
			"----------------------------",
			"2024-01-01   Rent      1,000",
			"2024-01-02   Tea           5",
			"                       -----",
			"             TOTALS:   1,005",
		]
		.join("\n") + "\n";
		assert_eq!(table.render(), expected);
	}

	#[test]
	fn test_short_rows_are_padded() {
		let mut table = Table::new(2);
		table.add_row(&["only"]);
		table.add_row(&["a", "b", "dropped"]);
		assert_eq!(table.render(), "only\na      b\n");
	}
}
