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
use crate::gl::rebuild::LoadedLedger;
use crate::gl::report::ReportKind;
use crate::reports::table::Table;
use crate::util::currency::{normalize_counted, ParseDiagnostics};
use crate::util::date::Date;
use serde::Serialize;

/// Ledger health at a glance: what the columns resolved to, how many buckets
/// each report kind would produce, and how many cells could not be read.
#[derive(Debug, Serialize)]
pub struct CheckReporter {
	columns: Vec<(String, String)>,
	rows: usize,
	accounts: usize,
	funds: usize,
	first_date: Option<String>,
	last_date: Option<String>,
	diagnostics: ParseDiagnostics,
}

impl CheckReporter {
	pub fn new(ledger: &LoadedLedger, profile: &LedgerProfile) -> Self {
		let name = |index: usize| {
			format!("{} (column {})", ledger.header.columns()[index], index + 1)
		};
		let mut columns = vec![
			("Account".to_string(), name(ledger.columns.account)),
			("Fund".to_string(), name(ledger.columns.fund)),
			("Debit".to_string(), name(ledger.columns.debit)),
			("Credit".to_string(), name(ledger.columns.credit)),
		];
		columns.push((
			"Date".to_string(),
			match ledger.columns.date {
				Some(index) => name(index),
				None => "missing; ledger order kept".to_string(),
			},
		));

		let mut diagnostics = ParseDiagnostics::new();

		for row in &ledger.rows {
			normalize_counted(row.get(ledger.columns.debit), &mut diagnostics);
			normalize_counted(row.get(ledger.columns.credit), &mut diagnostics);
		}

		let mut dates: Vec<Date> = Vec::new();
		if let Some(date_col) = ledger.columns.date {
			for row in &ledger.rows {
				let raw = row.get(date_col).to_string();
				match Date::from_ledger_str(&raw, profile.date_order) {
					Ok(date) => dates.push(date),
					Err(_) => diagnostics.unparseable_dates += 1,
				}
			}
		}

		Self {
			columns,
			rows: ledger.rows.len(),
			accounts: ledger.buckets(ReportKind::Account, profile).len(),
			funds: ledger.buckets(ReportKind::Fund, profile).len(),
			first_date: dates.iter().min().map(|d| d.to_string()),
			last_date: dates.iter().max().map(|d| d.to_string()),
			diagnostics,
		}
	}

	pub fn render(&self) -> String {
		let mut table = Table::new(2);
		table.right_align(&[1]);

		for (role, column) in &self.columns {
			table.add_row(&[format!("{} column", role), column.clone()]);
		}
		table.add_separator();
		table.add_row(&["Rows".to_string(), self.rows.to_string()]);
		table.add_row(&["Account reports".to_string(), self.accounts.to_string()]);
		table.add_row(&["Fund reports".to_string(), self.funds.to_string()]);
		if let (Some(first), Some(last)) = (&self.first_date, &self.last_date) {
			table.add_row(&["Dates".to_string(), format!("{} to {}", first, last)]);
		}
		table.add_row(&[
			"Unparseable amounts".to_string(),
			self.diagnostics.unparseable_amounts.to_string(),
		]);
		table.add_row(&[
			"Unparseable dates".to_string(),
			self.diagnostics.unparseable_dates.to_string(),
		]);

		table.render()
	}
}
