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
use anyhow::Error;

/// Receives finished reports. Renderers only present what they are given;
/// totals arrive already signed and must not be recomputed.
pub trait ReportRenderer {
	fn render(&mut self, report: &ReportDataset) -> Result<(), Error>;

	fn render_summary(&mut self, summary: &Summary) -> Result<(), Error>;

	/// A single requested report had no matching rows.
	fn not_found(&mut self, kind: ReportKind, name: &str) -> Result<(), Error>;

	/// Called once after every selected report was handed over.
	fn complete(&mut self, outcome: &RebuildOutcome) -> Result<(), Error>;
}

/// Fans every call out to several renderers, in order.
pub struct Renderers {
	inner: Vec<Box<dyn ReportRenderer>>,
}

impl Renderers {
	pub fn new(inner: Vec<Box<dyn ReportRenderer>>) -> Self {
		Self { inner }
	}
}

impl ReportRenderer for Renderers {
	fn render(&mut self, report: &ReportDataset) -> Result<(), Error> {
		self.inner.iter_mut().try_for_each(|r| r.render(report))
	}

	fn render_summary(&mut self, summary: &Summary) -> Result<(), Error> {
		self.inner.iter_mut().try_for_each(|r| r.render_summary(summary))
	}

	fn not_found(&mut self, kind: ReportKind, name: &str) -> Result<(), Error> {
		self.inner.iter_mut().try_for_each(|r| r.not_found(kind, name))
	}

	fn complete(&mut self, outcome: &RebuildOutcome) -> Result<(), Error> {
		self.inner.iter_mut().try_for_each(|r| r.complete(outcome))
	}
}

/// Keeps everything it is given; lets tests inspect what a rebuild emitted.
#[cfg(test)]
#[derive(Default)]
pub struct Recorder {
	pub reports: Vec<ReportDataset>,
	pub summaries: Vec<Summary>,
	pub not_found: Vec<(ReportKind, String)>,
	pub completions: Vec<RebuildOutcome>,
}

#[cfg(test)]
impl ReportRenderer for Recorder {
	fn render(&mut self, report: &ReportDataset) -> Result<(), Error> {
		self.reports.push(report.clone());
		Ok(())
	}

	fn render_summary(&mut self, summary: &Summary) -> Result<(), Error> {
		self.summaries.push(summary.clone());
		Ok(())
	}

	fn not_found(&mut self, kind: ReportKind, name: &str) -> Result<(), Error> {
		self.not_found.push((kind, name.to_string()));
		Ok(())
	}

	fn complete(&mut self, outcome: &RebuildOutcome) -> Result<(), Error> {
		self.completions.push(outcome.clone());
		Ok(())
	}
}
