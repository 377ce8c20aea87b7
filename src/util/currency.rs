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
use crate::gl::cell::Cell;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use std::sync::OnceLock;

/// Counts cells whose content could not be interpreted. Parsing never fails;
/// these counters exist so callers can tell how much was coerced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostics {
	pub unparseable_amounts: usize,
	pub unparseable_dates: usize,
	/// Amounts left out of a total because adding them would overflow.
	pub overflowed_amounts: usize,
}

impl ParseDiagnostics {
	pub fn new() -> Self {
		Default::default()
	}

	pub fn is_clean(&self) -> bool {
		self.unparseable_amounts == 0
			&& self.unparseable_dates == 0
			&& self.overflowed_amounts == 0
	}
}

/// Converts a loosely formatted monetary cell into an amount. Empty and
/// unparseable cells are zero; unparseable non-empty cells are counted.
pub fn normalize_counted(cell: &Cell, diag: &mut ParseDiagnostics) -> Decimal {
	match parse_amount(cell) {
		Some(value) => value,
		None => {
			tracing::debug!("unparseable amount {:?} treated as zero", cell);
			diag.unparseable_amounts += 1;
			Decimal::ZERO
		},
	}
}

/// Returns None only for non-empty text that holds no amount at all.
fn parse_amount(cell: &Cell) -> Option<Decimal> {
	match cell {
		Cell::Empty => Some(Decimal::ZERO),
		Cell::Number { value, .. } => Some(*value),
		Cell::Text(s) if s.trim().is_empty() => Some(Decimal::ZERO),
		Cell::Text(s) => parse_text(s),
	}
}

fn parse_text(raw: &str) -> Option<Decimal> {
	let kept: String = raw
		.chars()
		.filter(|c| c.is_ascii_digit() || matches!(c, '-' | ',' | '.'))
		.collect();

	let canonical = canonical_separators(&kept);

	// only the leading literal counts, e.g. "12-3" is 12
	let literal = leading_literal().find(&canonical)?.as_str();
	let (sign, digits) = match literal.strip_prefix('-') {
		Some(rest) => ("-", rest),
		None => ("", literal),
	};
	let digits = digits.trim_end_matches('.');
	let padded = if digits.starts_with('.') {
		format!("{}0{}", sign, digits)
	} else {
		format!("{}{}", sign, digits)
	};

	Decimal::from_str(&padded).ok()
}

/// Rewrites grouping and decimal separators so that at most one `.` remains
/// and it marks the decimal point.
///
/// - both `,` and `.`: whichever occurs last is the decimal point
/// - commas only: one comma is the decimal point, several are grouping
/// - periods only: one period is the decimal point, several are grouping
fn canonical_separators(s: &str) -> String {
	let commas = s.matches(',').count();
	let periods = s.matches('.').count();

	match (commas, periods) {
		(0, 0) => s.to_string(),
		(0, 1) => s.to_string(),
		(0, _) => s.replace('.', ""),
		(1, 0) => s.replace(',', "."),
		(_, 0) => s.replace(',', ""),
		_ => {
			let last_comma = s.rfind(',').unwrap_or(0);
			let last_period = s.rfind('.').unwrap_or(0);
			if last_period > last_comma {
				s.replace(',', "")
			} else {
				let without_periods = s.replace('.', "");
				match without_periods.rfind(',') {
					Some(pos) => {
						let (int_part, frac_part) = without_periods.split_at(pos);
						format!("{}.{}", int_part.replace(',', ""), &frac_part[1..])
					},
					None => without_periods,
				}
			}
		},
	}
}

fn leading_literal() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| {
		Regex::new(r"^-?(\d+(\.\d*)?|\.\d+)").expect("valid amount pattern")
	})
}
