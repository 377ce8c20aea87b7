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
use crate::gl::bucket::{sort_by_date, Bucket, Buckets, RowFilter};
use crate::gl::header::{Columns, Header, LedgerRow};
use crate::gl::report::{ReportDataset, ReportKind};
use crate::gl::source::LedgerSource;
use crate::gl::total::Totals;
use crate::reports::renderer::ReportRenderer;
use crate::util::currency::ParseDiagnostics;
use anyhow::Error;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scope {
	All,
	/// One report, named by bucket key or report identifier.
	Single(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RebuildRequest {
	pub kind: ReportKind,
	pub scope: Scope,
}

/// What a rebuild did, handed to the renderer once at the end.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RebuildOutcome {
	/// Identifiers of the reports produced, in emission order.
	pub produced: Vec<String>,
	/// Requested names that matched no rows.
	pub not_found: Vec<String>,
	pub diagnostics: ParseDiagnostics,
}

/// The ledger after loading and column resolution, ready for grouping.
pub struct LoadedLedger {
	pub header: Header,
	pub columns: Columns,
	pub rows: Vec<LedgerRow>,
}

impl LoadedLedger {
	/// Reads the header first and resolves every required column, so a
	/// missing column fails before the rows are even read.
	pub fn load(
		source: &dyn LedgerSource,
		profile: &LedgerProfile,
	) -> Result<LoadedLedger, Error> {
		let header = source.header()?;
		let columns = Columns::resolve(&header, profile)?;
		let rows = source.rows()?;

		Ok(LoadedLedger {
			header,
			columns,
			rows,
		})
	}

	/// Groups rows for the given report kind. Fund reports only see rows
	/// booked to one of the profile's revenue or expense accounts.
	pub fn buckets(&self, kind: ReportKind, profile: &LedgerProfile) -> Buckets {
		match kind {
			ReportKind::Account => {
				Buckets::group(&self.rows, self.columns.account, None)
			},
			ReportKind::Fund => {
				let filter = RowFilter {
					column: self.columns.account,
					allowed: &profile.revenue_expense_labels,
				};
				Buckets::group(&self.rows, self.columns.fund, Some(&filter))
			},
		}
	}
}

/// Rebuilds account or fund reports from `source`, handing each to
/// `renderer`. A missing column aborts before anything is rendered; a single
/// requested report without rows is reported and skipped.
pub fn rebuild(
	source: &dyn LedgerSource,
	profile: &LedgerProfile,
	request: &RebuildRequest,
	renderer: &mut dyn ReportRenderer,
) -> Result<RebuildOutcome, Error> {
	let ledger = LoadedLedger::load(source, profile)?;
	let buckets = ledger.buckets(request.kind, profile);
	if buckets.is_empty() {
		tracing::warn!("ledger has no {} rows to report on", request.kind);
	}
	let prefix = profile.prefix(request.kind);

	let mut outcome = RebuildOutcome::default();

	let selected: Vec<&Bucket> = match &request.scope {
		Scope::All => buckets.iter().collect(),
		Scope::Single(name) => match buckets.find(name, prefix) {
			Some(bucket) => vec![bucket],
			None => {
				tracing::warn!("no {} data found for '{}'", request.kind, name);
				renderer.not_found(request.kind, name)?;
				outcome.not_found.push(name.clone());
				vec![]
			},
		},
	};

	for bucket in selected {
		let report = build_report(
			&ledger,
			bucket,
			request.kind,
			profile,
			&mut outcome.diagnostics,
		);
		renderer.render(&report)?;
		outcome.produced.push(report.id);
	}

	if !outcome.diagnostics.is_clean() {
		tracing::debug!("parse diagnostics: {:?}", outcome.diagnostics);
	}
	tracing::info!(
		"rebuilt {} {} report(s)",
		outcome.produced.len(),
		request.kind
	);

	renderer.complete(&outcome)?;
	Ok(outcome)
}

/// Sorts one bucket's rows and totals them.
pub fn build_report(
	ledger: &LoadedLedger,
	bucket: &Bucket,
	kind: ReportKind,
	profile: &LedgerProfile,
	diag: &mut ParseDiagnostics,
) -> ReportDataset {
	let mut rows = bucket.rows.clone();
	if let Some(date_col) = ledger.columns.date {
		sort_by_date(&mut rows, date_col, profile.date_order, diag);
	}

	let totals = Totals::from_rows(
		&rows,
		ledger.columns.debit,
		ledger.columns.credit,
		profile.sign_convention(kind),
		diag,
	);

	ReportDataset {
		id: format!("{}{}", profile.prefix(kind), bucket.safe_key()),
		key: bucket.key.clone(),
		kind,
		header: ledger.header.clone(),
		rows,
		totals,
		debit_column: ledger.columns.debit,
		credit_column: ledger.columns.credit,
	}
}
