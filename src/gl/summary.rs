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
use crate::gl::bucket::Buckets;
use crate::gl::rebuild::LoadedLedger;
use crate::gl::report::ReportKind;
use crate::gl::source::LedgerSource;
use crate::gl::total::Totals;
use crate::util::currency::ParseDiagnostics;
use anyhow::Error;
use serde::Serialize;

/// The consolidated report: fund balances first, then account balances
/// split into the profile's categories.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
	pub title: Option<String>,
	pub currency: Option<String>,
	pub funds: SummaryTable,
	pub accounts: Vec<SummaryTable>,
	pub diagnostics: ParseDiagnostics,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SummaryTable {
	pub title: String,
	pub kind: ReportKind,
	pub lines: Vec<SummaryLine>,
	pub grand_total: Totals,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
	pub name: String,
	/// Identifier of the per-bucket report this line summarizes.
	pub report_id: String,
	pub totals: Totals,
}

impl SummaryTable {
	fn new(title: &str, kind: ReportKind, profile: &LedgerProfile) -> Self {
		Self {
			title: title.to_string(),
			kind,
			lines: Vec::new(),
			grand_total: Totals::zero(profile.sign_convention(kind)),
		}
	}

	fn push(&mut self, line: SummaryLine) {
		self.grand_total += &line.totals;
		self.lines.push(line);
	}
}

pub fn summarize(
	source: &dyn LedgerSource,
	profile: &LedgerProfile,
) -> Result<Summary, Error> {
	// bad patterns are configuration errors, caught before reading rows
	let groups = profile.compiled_groups()?;
	let ledger = LoadedLedger::load(source, profile)?;
	let mut diagnostics = ParseDiagnostics::new();

	let mut funds = SummaryTable::new("Fund Summary", ReportKind::Fund, profile);
	for line in lines(&ledger, ReportKind::Fund, profile, &mut diagnostics) {
		funds.push(line);
	}

	let mut accounts: Vec<SummaryTable> = groups
		.iter()
		.map(|(title, _)| SummaryTable::new(title, ReportKind::Account, profile))
		.collect();
	let mut fallback = SummaryTable::new(
		&profile.summary_fallback_title,
		ReportKind::Account,
		profile,
	);

	for line in lines(&ledger, ReportKind::Account, profile, &mut diagnostics) {
		match groups.iter().position(|(_, re)| re.is_match(&line.name)) {
			Some(i) => accounts[i].push(line),
			None => fallback.push(line),
		}
	}
	accounts.push(fallback);

	Ok(Summary {
		title: profile.title.clone(),
		currency: profile.currency.clone(),
		funds,
		accounts,
		diagnostics,
	})
}

fn lines(
	ledger: &LoadedLedger,
	kind: ReportKind,
	profile: &LedgerProfile,
	diag: &mut ParseDiagnostics,
) -> Vec<SummaryLine> {
	let buckets: Buckets = ledger.buckets(kind, profile);

	buckets
		.iter()
		.map(|bucket| SummaryLine {
			name: bucket.key.clone(),
			report_id: format!("{}{}", profile.prefix(kind), bucket.safe_key()),
			totals: Totals::from_rows(
				&bucket.rows,
				ledger.columns.debit,
				ledger.columns.credit,
				profile.sign_convention(kind),
				diag,
			),
		})
		.collect()
}
