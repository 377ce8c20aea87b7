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
use crate::gl::summary::Summary;
use crate::reports::renderer::ReportRenderer;
use anyhow::Error;
use serde::Serialize;
use std::io::Write;

/// Collects everything and writes one JSON document on completion.
pub struct JsonRenderer<W: Write> {
	out: W,
	reports: Vec<ReportDataset>,
	summary: Option<Summary>,
}

#[derive(Serialize)]
struct Document<'a> {
	#[serde(skip_serializing_if = "Option::is_none")]
	summary: Option<&'a Summary>,
	reports: &'a [ReportDataset],
	#[serde(flatten)]
	outcome: &'a RebuildOutcome,
}

impl<W: Write> JsonRenderer<W> {
	pub fn new(out: W) -> Self {
		Self {
			out,
			reports: Vec::new(),
			summary: None,
		}
	}

	#[cfg(test)]
	pub fn into_inner(self) -> W {
		self.out
	}
}

impl<W: Write> ReportRenderer for JsonRenderer<W> {
	fn render(&mut self, report: &ReportDataset) -> Result<(), Error> {
		self.reports.push(report.clone());
		Ok(())
	}

	fn render_summary(&mut self, summary: &Summary) -> Result<(), Error> {
		self.summary = Some(summary.clone());
		Ok(())
	}

	fn not_found(&mut self, _kind: ReportKind, _name: &str) -> Result<(), Error> {
		// listed in the outcome
		Ok(())
	}

	fn complete(&mut self, outcome: &RebuildOutcome) -> Result<(), Error> {
		let document = Document {
			summary: self.summary.as_ref(),
			reports: &self.reports,
			outcome,
		};
		serde_json::to_writer_pretty(&mut self.out, &document)?;
		writeln!(self.out)?;
		self.out.flush()?;
		Ok(())
	}
}
