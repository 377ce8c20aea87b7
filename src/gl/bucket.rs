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
use crate::gl::header::LedgerRow;
use crate::util::currency::ParseDiagnostics;
use crate::util::date::{Date, DateOrder};
use crate::util::names::{loose_eq, sheet_safe};
use std::collections::HashMap;

/// Keeps rows whose value in `column`, trimmed, is one of `allowed`.
/// Matching is exact; there is no case folding.
pub struct RowFilter<'a> {
	pub column: usize,
	pub allowed: &'a [String],
}

impl RowFilter<'_> {
	pub fn accepts(&self, row: &LedgerRow) -> bool {
		match row.get(self.column).key() {
			Some(value) => self.allowed.iter().any(|a| a.trim() == value),
			None => false,
		}
	}
}

/// Rows sharing one trimmed key, in ledger order.
#[derive(Debug)]
pub struct Bucket {
	pub key: String,
	pub rows: Vec<LedgerRow>,
}

impl Bucket {
	/// The key with characters that are invalid in identifiers replaced.
	pub fn safe_key(&self) -> String {
		sheet_safe(&self.key)
	}
}

/// All buckets of one grouping, in order of first appearance.
#[derive(Debug, Default)]
pub struct Buckets {
	buckets: Vec<Bucket>,
	index: HashMap<String, usize>,
}

impl Buckets {
	/// Groups `rows` by the trimmed value of `group_col`. Rows with an empty
	/// grouping value, or rejected by `filter`, are left out.
	pub fn group(
		rows: &[LedgerRow],
		group_col: usize,
		filter: Option<&RowFilter>,
	) -> Self {
		let mut buckets = Buckets::default();

		for row in rows {
			let Some(key) = row.get(group_col).key() else {
				continue;
			};
			if let Some(filter) = filter {
				if !filter.accepts(row) {
					continue;
				}
			}

			let i = match buckets.index.get(&key) {
				Some(i) => *i,
				None => {
					buckets.buckets.push(Bucket {
						key: key.clone(),
						rows: Vec::new(),
					});
					buckets.index.insert(key, buckets.buckets.len() - 1);
					buckets.buckets.len() - 1
				},
			};
			buckets.buckets[i].rows.push(row.clone());
		}

		buckets
	}

	pub fn len(&self) -> usize {
		self.buckets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.buckets.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
		self.buckets.iter()
	}

	/// Resolves a requested report name to a bucket: first the exact trimmed
	/// key, then a loose match on the sheet-safe form. `prefix`, when the name
	/// carries it, is removed first so report identifiers resolve too.
	pub fn find(&self, name: &str, prefix: &str) -> Option<&Bucket> {
		let name = name.trim();
		let candidates = match name.strip_prefix(prefix) {
			Some(stripped) if !prefix.is_empty() => vec![stripped.trim(), name],
			_ => vec![name],
		};

		for candidate in &candidates {
			if let Some(i) = self.index.get(*candidate) {
				return Some(&self.buckets[*i]);
			}
		}

		candidates.iter().find_map(|candidate| {
			self.buckets.iter().find(|b| loose_eq(&b.key, candidate))
		})
	}
}

/// Sorts rows oldest first by the date in `date_col`. The sort is stable, so
/// rows dated the same day keep their ledger order. Rows whose date does not
/// parse go last, also in ledger order.
pub fn sort_by_date(
	rows: &mut [LedgerRow],
	date_col: usize,
	order: DateOrder,
	diag: &mut ParseDiagnostics,
) {
	let mut keyed: Vec<(Option<Date>, LedgerRow)> = rows
		.iter()
		.map(|row| {
			let raw = row.get(date_col).to_string();
			let date = match Date::from_ledger_str(&raw, order) {
				Ok(date) => Some(date),
				Err(e) => {
					tracing::debug!("line {}: {}", row.line, e);
					diag.unparseable_dates += 1;
					None
				},
			};
			(date, row.clone())
		})
		.collect();

	keyed.sort_by_key(|(date, _)| (date.is_none(), *date));

	for (slot, (_, row)) in rows.iter_mut().zip(keyed) {
		*slot = row;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::gl::cell::Cell;

	// columns: Account, Funds, Date
	fn rows(data: &[(&str, &str, &str)]) -> Vec<LedgerRow> {
		data.iter()
			.enumerate()
			.map(|(i, (account, fund, date))| {
				LedgerRow::new(
					i + 2,
					vec![
						Cell::from_raw(account),
						Cell::from_raw(fund),
						Cell::from_raw(date),
					],
					3,
				)
			})
			.collect()
	}

	fn lines(rows: &[LedgerRow]) -> Vec<usize> {
		rows.iter().map(|r| r.line).collect()
	}

	#[test]
	fn test_filter_and_group() {
		let data = rows(&[
			("Expenses", "Grants", "01/01/24"),
			("Bank", "Grants", "02/01/24"),
			(" Revenues ", " Grants ", "03/01/24"),
			("Expenses", "", "04/01/24"),
			("", "Grants", "05/01/24"),
			("Expenses", "Legal & Admin", "06/01/24"),
			("expenses", "Grants", "07/01/24"),
		]);
		let allowed = vec!["Expenses".to_string(), "Revenues".to_string()];
		let filter = RowFilter {
			column: 0,
			allowed: &allowed,
		};

		let buckets = Buckets::group(&data, 1, Some(&filter));
		let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
		assert_eq!(keys, vec!["Grants", "Legal & Admin"]);
		assert_eq!(lines(&buckets.iter().next().unwrap().rows), vec![2, 4]);
	}

	#[test]
	fn test_group_without_filter() {
		let data = rows(&[
			("Bank", "", "01/01/24"),
			("Cash", "", "01/01/24"),
			("Bank", "x", "01/01/24"),
			("", "x", "01/01/24"),
		]);
		let buckets = Buckets::group(&data, 0, None);
		assert_eq!(buckets.len(), 2);
		assert_eq!(lines(&buckets.iter().next().unwrap().rows), vec![2, 4]);
	}

	#[test]
	fn test_find_exact_then_loose() {
		let data = rows(&[
			("Expenses", "Legal & Admin", ""),
			("Expenses", "R/D", ""),
			("Expenses", "R D", ""),
		]);
		let buckets = Buckets::group(&data, 1, None);

		assert_eq!(buckets.find("Legal & Admin", "").unwrap().key, "Legal & Admin");
		assert_eq!(buckets.find("Legal  Admin", "").unwrap().key, "Legal & Admin");
		// exact match wins over an earlier loose one
		assert_eq!(buckets.find("R D", "").unwrap().key, "R D");
		assert_eq!(buckets.find("Fund - R/D", "Fund - ").unwrap().key, "R/D");
		assert!(buckets.find("Travel", "").is_none());
	}

	#[test]
	fn test_sort_is_stable_and_puts_bad_dates_last() {
		let mut data = rows(&[
			("A", "", "03/01/24"),
			("A", "", "someday"),
			("A", "", "01/01/24"),
			("A", "", "03/01/24"),
			("A", "", ""),
			("A", "", "2023-12-31"),
		]);
		let mut diag = ParseDiagnostics::new();
		sort_by_date(&mut data, 2, DateOrder::Dmy, &mut diag);
		assert_eq!(lines(&data), vec![7, 4, 2, 5, 3, 6]);
		assert_eq!(diag.unparseable_dates, 2);
	}

	#[test]
	fn test_sort_is_idempotent() {
		let mut once = rows(&[
			("A", "", "05/01/24"),
			("A", "", "02/01/24"),
			("A", "", "02/01/24"),
		]);
		let mut diag = ParseDiagnostics::new();
		sort_by_date(&mut once, 2, DateOrder::Dmy, &mut diag);
		let mut twice = once.clone();
		sort_by_date(&mut twice, 2, DateOrder::Dmy, &mut diag);
		assert_eq!(once, twice);
	}
}
