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
use crate::reports::renderer::ReportRenderer;
use anyhow::{Context, Error};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes each report to its own CSV file in a directory, replacing any
/// earlier file of the same name. The file is the report identifier; two
/// reports of one run sharing an identifier get numbered files.
pub struct CsvRenderer {
	dir: PathBuf,
	written: HashSet<String>,
}

impl CsvRenderer {
	/// The directory is created on the first write, so nothing touches the
	/// disk when a rebuild fails early.
	pub fn new(dir: &Path) -> Self {
		Self {
			dir: dir.to_path_buf(),
			written: HashSet::new(),
		}
	}

	/// Picks a file name for `id` not yet used in this run.
	fn claim(&mut self, id: &str) -> String {
		let mut name = id.to_string();
		let mut n = 1;
		while self.written.contains(&name) {
			n += 1;
			name = format!("{} ({})", id, n);
		}
		if n > 1 {
			tracing::warn!("report '{}' already written; saving as '{}'", id, name);
		}
		self.written.insert(name.clone());
		name
	}

	fn writer(&self, name: &str) -> Result<csv::Writer<fs::File>, Error> {
		fs::create_dir_all(&self.dir).with_context(|| {
			format!("failed to create {}", self.dir.display())
		})?;
		let path = self.dir.join(format!("{}.csv", name));
		csv::WriterBuilder::new()
			.flexible(true)
			.from_path(&path)
			.with_context(|| format!("failed to write {}", path.display()))
	}
}

fn summary_records(table: &SummaryTable) -> Vec<Vec<String>> {
	let mut records = vec![
		vec![table.title.clone()],
		vec![
			"Name".to_string(),
			"Total Debit".to_string(),
			"Total Credit".to_string(),
			"Remaining".to_string(),
		],
	];

	for line in &table.lines {
		records.push(vec![
			line.name.clone(),
			line.totals.total_debit.to_string(),
			line.totals.total_credit.to_string(),
			line.totals.remaining.to_string(),
		]);
	}

	records.push(vec![
		"GRAND TOTAL".to_string(),
		table.grand_total.total_debit.to_string(),
		table.grand_total.total_credit.to_string(),
		table.grand_total.remaining.to_string(),
	]);
	records
}

impl ReportRenderer for CsvRenderer {
	fn render(&mut self, report: &ReportDataset) -> Result<(), Error> {
		let name = self.claim(&report.id);
		let mut writer = self.writer(&name)?;
		writer.write_record(report.header.columns())?;
		for row in &report.rows {
			writer.write_record(row.cells.iter().map(|c| c.to_string()))?;
		}

		let width = report.header.len();
		let mut totals = vec![String::new(); width];
		let label_col = report.debit_column.min(report.credit_column);
		if let Some(col) = label_col.checked_sub(1) {
			totals[col] = "TOTALS:".to_string();
		}
		totals[report.debit_column] = report.totals.total_debit.to_string();
		totals[report.credit_column] = report.totals.total_credit.to_string();
		writer.write_record(&totals)?;

		let mut remaining = vec![String::new(); width];
		if let Some(col) = label_col.checked_sub(1) {
			remaining[col] = "REMAINING:".to_string();
		}
		remaining[report.debit_column.max(report.credit_column)] =
			report.totals.remaining.to_string();
		writer.write_record(&remaining)?;

		writer.flush()?;
		Ok(())
	}

	fn render_summary(&mut self, summary: &Summary) -> Result<(), Error> {
		let name = self.claim("Summary");
		let mut writer = self.writer(&name)?;
		for table in std::iter::once(&summary.funds).chain(&summary.accounts) {
			for record in summary_records(table) {
				writer.write_record(&record)?;
			}
		}
		writer.flush()?;
		Ok(())
	}

	fn not_found(&mut self, _kind: ReportKind, _name: &str) -> Result<(), Error> {
		Ok(())
	}

	fn complete(&mut self, outcome: &RebuildOutcome) -> Result<(), Error> {
		tracing::info!(
			"wrote {} file(s) to {}",
			outcome.produced.len(),
			self.dir.display()
		);
		Ok(())
	}
}
