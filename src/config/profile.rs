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
use crate::gl::errors::ConfigError;
use crate::gl::report::ReportKind;
use crate::gl::total::SignConvention;
use crate::util::date::DateOrder;
use regex::Regex;
use serde::Deserialize;

/// Everything that differs between one ledger and another: column names,
/// which accounts feed the fund reports, and how balances are signed.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LedgerProfile {
	/// Heading printed above the summary, e.g. the organization name.
	pub title: Option<String>,
	pub currency: Option<String>,

	pub account_column: String,
	pub fund_column: String,
	pub date_column: String,
	pub debit_column: String,
	pub credit_column: String,
	pub date_order: DateOrder,

	/// Account labels whose rows are sliced by fund.
	pub revenue_expense_labels: Vec<String>,

	pub fund_sign: SignConvention,
	pub account_sign: SignConvention,

	pub fund_prefix: String,
	pub account_prefix: String,

	/// Account categories of the summary, tried in order.
	pub summary_groups: Vec<SummaryGroup>,
	/// Title of the summary table holding accounts no group matched.
	pub summary_fallback_title: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SummaryGroup {
	pub title: String,
	pub pattern: String,
}

impl Default for LedgerProfile {
	fn default() -> Self {
		Self {
			title: None,
			currency: None,
			account_column: "Account".to_string(),
			fund_column: "Funds".to_string(),
			date_column: "Date".to_string(),
			debit_column: "Debit".to_string(),
			credit_column: "Credit".to_string(),
			date_order: DateOrder::default(),
			revenue_expense_labels: vec![
				"Expenses".to_string(),
				"Revenues".to_string(),
			],
			fund_sign: SignConvention::CreditMinusDebit,
			account_sign: SignConvention::DebitMinusCredit,
			fund_prefix: "Fund - ".to_string(),
			account_prefix: String::new(),
			summary_groups: vec![SummaryGroup {
				title: "Revenues & Expenses".to_string(),
				pattern: "(?i)expense|revenue".to_string(),
			}],
			summary_fallback_title: "Custodian Accounts".to_string(),
		}
	}
}

impl LedgerProfile {
	pub fn sign_convention(&self, kind: ReportKind) -> SignConvention {
		match kind {
			ReportKind::Account => self.account_sign,
			ReportKind::Fund => self.fund_sign,
		}
	}

	pub fn prefix(&self, kind: ReportKind) -> &str {
		match kind {
			ReportKind::Account => &self.account_prefix,
			ReportKind::Fund => &self.fund_prefix,
		}
	}

	/// Compiles the summary groups, failing on the first bad pattern.
	pub fn compiled_groups(&self) -> Result<Vec<(String, Regex)>, ConfigError> {
		self.summary_groups
			.iter()
			.map(|group| {
				Regex::new(&group.pattern)
					.map(|re| (group.title.clone(), re))
					.map_err(|source| ConfigError::InvalidPattern {
						pattern: group.pattern.clone(),
						source,
					})
			})
			.collect()
	}
}
