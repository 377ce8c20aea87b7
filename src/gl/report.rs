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
use crate::gl::header::{Header, LedgerRow};
use crate::gl::total::Totals;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
	Account,
	Fund,
}

impl fmt::Display for ReportKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ReportKind::Account => write!(f, "account"),
			ReportKind::Fund => write!(f, "fund"),
		}
	}
}

/// One rebuilt report: the ledger header, the bucket's rows oldest first,
/// and totals over exactly those rows. Renderers display this as is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportDataset {
	/// Report identifier, e.g. "Fund - Grants".
	pub id: String,
	/// The bucket key the rows were grouped under.
	pub key: String,
	pub kind: ReportKind,
	pub header: Header,
	pub rows: Vec<LedgerRow>,
	pub totals: Totals,
	/// Positions of the debit and credit columns within `header`.
	pub debit_column: usize,
	pub credit_column: usize,
}
