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
use crate::util::currency::{normalize_counted, ParseDiagnostics};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Which side of the ledger counts as money in. Revenue and expense style
/// reports treat credits as inflows; asset and custodian style reports treat
/// debits as inflows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignConvention {
	CreditMinusDebit,
	DebitMinusCredit,
}

impl SignConvention {
	/// Saturates at the bounds of `Decimal` instead of overflowing.
	pub fn remaining(&self, debit: Decimal, credit: Decimal) -> Decimal {
		match self {
			SignConvention::CreditMinusDebit => credit.saturating_sub(debit),
			SignConvention::DebitMinusCredit => debit.saturating_sub(credit),
		}
	}
}

/// Debit and credit sums of a set of rows, with the remaining balance
/// derived under an explicit convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Totals {
	pub total_debit: Decimal,
	pub total_credit: Decimal,
	pub remaining: Decimal,
	pub convention: SignConvention,
}

impl Totals {
	pub fn zero(convention: SignConvention) -> Self {
		Self::new(Decimal::ZERO, Decimal::ZERO, convention)
	}

	pub fn new(
		total_debit: Decimal,
		total_credit: Decimal,
		convention: SignConvention,
	) -> Self {
		Self {
			total_debit,
			total_credit,
			remaining: convention.remaining(total_debit, total_credit),
			convention,
		}
	}

	/// Sums the debit and credit cells of `rows`. An amount that would
	/// overflow a sum is left out and counted.
	pub fn from_rows(
		rows: &[LedgerRow],
		debit_col: usize,
		credit_col: usize,
		convention: SignConvention,
		diag: &mut ParseDiagnostics,
	) -> Self {
		let mut total_debit = Decimal::ZERO;
		let mut total_credit = Decimal::ZERO;

		for row in rows {
			let debit = normalize_counted(row.get(debit_col), diag);
			let credit = normalize_counted(row.get(credit_col), diag);
			total_debit = accumulate(total_debit, debit, row.line, diag);
			total_credit = accumulate(total_credit, credit, row.line, diag);
		}

		Self::new(total_debit, total_credit, convention)
	}
}

fn accumulate(
	sum: Decimal,
	amount: Decimal,
	line: usize,
	diag: &mut ParseDiagnostics,
) -> Decimal {
	match sum.checked_add(amount) {
		Some(total) => total,
		None => {
			tracing::warn!("line {}: amount {} overflows the total", line, amount);
			diag.overflowed_amounts += 1;
			sum
		},
	}
}

impl AddAssign<&Totals> for Totals {
	/// Accumulates sums, saturating at the bounds of `Decimal`; `remaining`
	/// is re-derived under this total's own convention.
	fn add_assign(&mut self, other: &Totals) {
		*self = Totals::new(
			self.total_debit.saturating_add(other.total_debit),
			self.total_credit.saturating_add(other.total_credit),
			self.convention,
		);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::gl::cell::Cell;
	use std::str::FromStr;

	fn row(debit: &str, credit: &str) -> LedgerRow {
		LedgerRow::new(0, vec![Cell::from_raw(debit), Cell::from_raw(credit)], 2)
	}

	fn dec(s: &str) -> Decimal {
		Decimal::from_str(s).unwrap()
	}

	#[test]
	fn test_revenue_expense_convention() {
		let rows = vec![row("100", "0"), row("0", "50")];
		let mut diag = ParseDiagnostics::new();
		let totals = Totals::from_rows(
			&rows,
			0,
			1,
			SignConvention::CreditMinusDebit,
			&mut diag,
		);
		assert_eq!(totals.total_debit, dec("100"));
		assert_eq!(totals.total_credit, dec("50"));
		assert_eq!(totals.remaining, dec("-50"));
		assert!(diag.is_clean());
	}

	#[test]
	fn test_asset_convention() {
		let rows = vec![row("1,000,000", ""), row("", "250,000.5")];
		let mut diag = ParseDiagnostics::new();
		let totals = Totals::from_rows(
			&rows,
			0,
			1,
			SignConvention::DebitMinusCredit,
			&mut diag,
		);
		assert_eq!(totals.remaining, dec("749999.5"));
	}

	#[test]
	fn test_bad_cells_count_as_zero() {
		let rows = vec![row("n/a", "10"), row("5", "pending")];
		let mut diag = ParseDiagnostics::new();
		let totals = Totals::from_rows(
			&rows,
			0,
			1,
			SignConvention::CreditMinusDebit,
			&mut diag,
		);
		assert_eq!(totals.total_debit, dec("5"));
		assert_eq!(totals.total_credit, dec("10"));
		assert_eq!(diag.unparseable_amounts, 2);
	}

	#[test]
	fn test_accumulate_keeps_own_convention() {
		let mut grand = Totals::zero(SignConvention::DebitMinusCredit);
		grand += &Totals::new(dec("30"), dec("10"), SignConvention::CreditMinusDebit);
		grand += &Totals::new(dec("5"), dec("0"), SignConvention::DebitMinusCredit);
		assert_eq!(grand.total_debit, dec("35"));
		assert_eq!(grand.total_credit, dec("10"));
		assert_eq!(grand.remaining, dec("25"));
	}

	#[test]
	fn test_overflowing_amount_is_counted_not_fatal() {
		let rows = vec![
			row("79228162514264337593543950335", ""),
			row("1", "-79228162514264337593543950335"),
			row("-5", ""),
		];
		let mut diag = ParseDiagnostics::new();
		let totals = Totals::from_rows(
			&rows,
			0,
			1,
			SignConvention::DebitMinusCredit,
			&mut diag,
		);
		assert_eq!(totals.total_debit, Decimal::MAX - dec("5"));
		assert_eq!(totals.total_credit, Decimal::MIN);
		assert_eq!(totals.remaining, Decimal::MAX);
		assert_eq!(diag.overflowed_amounts, 1);
		assert_eq!(diag.unparseable_amounts, 0);

		let mut grand = Totals::zero(SignConvention::CreditMinusDebit);
		grand += &totals;
		grand += &totals;
		assert_eq!(grand.total_debit, Decimal::MAX);
		assert_eq!(grand.remaining, Decimal::MIN);
	}
}
