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
use crate::gl::rebuild::RebuildOutcome;
use crate::gl::report::{ReportDataset, ReportKind};
use crate::gl::summary::{Summary, SummaryTable};
use crate::gl::total::Totals;
use crate::reports::renderer::ReportRenderer;
use crate::reports::table::Table;
use crate::util::amount::Amount;
use anyhow::Error;
use chrono::Local;
use std::io::Write;

/// Renders reports as plain text tables.
pub struct TableRenderer<W: Write> {
	out: W,
	currency: Option<String>,
	timestamp: String,
}

impl<W: Write> TableRenderer<W> {
	pub fn new(out: W, currency: Option<String>) -> Self {
		Self {
			out,
			currency,
			timestamp: Local::now().format("%Y-%m-%d %H:%M").to_string(),
		}
	}

	/// Replaces the clock reading printed in footers and summary headings.
	#[cfg(test)]
	pub fn with_timestamp(mut self, timestamp: &str) -> Self {
		self.timestamp = timestamp.to_string();
		self
	}

	#[cfg(test)]
	pub fn into_inner(self) -> W {
		self.out
	}

	fn money(&self, value: rust_decimal::Decimal) -> String {
		Amount::new(value, self.currency.as_deref()).to_string()
	}

	fn column_title(&self, title: &str) -> String {
		match &self.currency {
			Some(currency) => format!("{} ({})", title, currency),
			None => title.to_string(),
		}
	}

	fn summary_table(&self, table: &SummaryTable) -> String {
		if table.lines.is_empty() {
			return "No data available.\n".to_string();
		}

		// fund tables carry a leading type column
		let offset = match table.kind {
			ReportKind::Fund => 1,
			ReportKind::Account => 0,
		};
		let mut out = Table::new(4 + offset);
		out.right_align(&[1 + offset, 2 + offset, 3 + offset]);

		let mut header = Vec::new();
		if offset == 1 {
			header.push("Type".to_string());
		}
		header.push("Name".to_string());
		header.push(self.column_title("Total Debit"));
		header.push(self.column_title("Total Credit"));
		header.push(self.column_title("Remaining"));
		out.add_header(&header);
		out.add_separator();

		for line in &table.lines {
			out.add_row(&summary_row(offset, "Fund", &line.name, &line.totals));
		}

		out.add_partial_separator(&[1 + offset, 2 + offset, 3 + offset]);
		out.add_row(&summary_row(offset, "", "GRAND TOTAL", &table.grand_total));

		out.render()
	}
}

fn summary_row(
	offset: usize,
	kind_label: &str,
	name: &str,
	totals: &Totals,
) -> Vec<String> {
	let mut row = Vec::new();
	if offset == 1 {
		row.push(kind_label.to_string());
	}
	row.push(name.to_string());
	row.push(Amount::bare(totals.total_debit).to_string());
	row.push(Amount::bare(totals.total_credit).to_string());
	row.push(Amount::bare(totals.remaining).to_string());
	row
}

/// I, II, III... for section numbering.
fn roman(mut n: usize) -> String {
	const NUMERALS: [(usize, &str); 13] = [
		(1000, "M"),
		(900, "CM"),
		(500, "D"),
		(400, "CD"),
		(100, "C"),
		(90, "XC"),
		(50, "L"),
		(40, "XL"),
		(10, "X"),
		(9, "IX"),
		(5, "V"),
		(4, "IV"),
		(1, "I"),
	];

	let mut out = String::new();
	for (value, numeral) in NUMERALS {
		while n >= value {
			out.push_str(numeral);
			n -= value;
		}
	}
	out
}

impl<W: Write> ReportRenderer for TableRenderer<W> {
	fn render(&mut self, report: &ReportDataset) -> Result<(), Error> {
		let columns = report.header.len();
		let (debit, credit) = (report.debit_column, report.credit_column);

		let mut table = Table::new(columns);
		table.right_align(&[debit, credit]);
		table.add_header(report.header.columns());
		table.add_separator();

		for row in &report.rows {
			let cells: Vec<String> =
				row.cells.iter().map(|c| c.to_string()).collect();
			table.add_row(&cells);
		}

		table.add_partial_separator(&[debit, credit]);

		let label_col = debit.min(credit).checked_sub(1);
		let mut totals_row = vec![String::new(); columns];
		let mut remaining_row = vec![String::new(); columns];
		if let Some(col) = label_col {
			totals_row[col] = "TOTALS:".to_string();
			remaining_row[col] = "REMAINING:".to_string();
		}
		totals_row[debit] = Amount::bare(report.totals.total_debit).to_string();
		totals_row[credit] = Amount::bare(report.totals.total_credit).to_string();
		remaining_row[debit.max(credit)] = self.money(report.totals.remaining);
		table.add_row(&totals_row);
		table.add_row(&remaining_row);

		writeln!(self.out, "{}", report.id)?;
		writeln!(self.out)?;
		write!(self.out, "{}", table.render())?;
		writeln!(self.out)?;
		Ok(())
	}

	fn render_summary(&mut self, summary: &Summary) -> Result<(), Error> {
		if let Some(title) = &summary.title {
			writeln!(self.out, "{}", title.to_uppercase())?;
		}
		writeln!(self.out, "COMPREHENSIVE FINANCIAL SUMMARY REPORT")?;
		writeln!(self.out, "Generated on: {}", self.timestamp)?;
		writeln!(self.out)?;

		writeln!(self.out, "{}", summary.funds.title.to_uppercase())?;
		writeln!(self.out)?;
		write!(self.out, "{}", self.summary_table(&summary.funds))?;
		writeln!(self.out)?;

		writeln!(self.out, "ACCOUNTS SUMMARY")?;
		for (i, table) in summary.accounts.iter().enumerate() {
			writeln!(self.out)?;
			writeln!(self.out, "{}. {}", roman(i + 1), table.title)?;
			writeln!(self.out)?;
			write!(self.out, "{}", self.summary_table(table))?;
		}
		writeln!(self.out)?;
		Ok(())
	}

	fn not_found(&mut self, kind: ReportKind, name: &str) -> Result<(), Error> {
		writeln!(self.out, "No data found for {} '{}'", kind, name)?;
		Ok(())
	}

	fn complete(&mut self, outcome: &RebuildOutcome) -> Result<(), Error> {
		writeln!(
			self.out,
			"Done: {} report(s) rebuilt (last update {})",
			outcome.produced.len(),
			self.timestamp
		)?;
		self.out.flush()?;
		Ok(())
	}
}
