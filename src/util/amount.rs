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
use rust_decimal::Decimal;
use std::fmt;

/// A decimal value for display, grouped by thousands and rounded to two
/// decimal places, optionally followed by a currency code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Amount<'a> {
	pub value: Decimal,
	pub currency: Option<&'a str>,
}

impl<'a> Amount<'a> {
	pub fn new(value: Decimal, currency: Option<&'a str>) -> Self {
		Self { value, currency }
	}

	pub fn bare(value: Decimal) -> Self {
		Self {
			value,
			currency: None,
		}
	}

	fn grouped(&self) -> String {
		let rounded = self.value.round_dp(2).to_string();
		let (sign, unsigned) = match rounded.strip_prefix('-') {
			Some(rest) => ("-", rest),
			None => ("", rounded.as_str()),
		};
		let (int_part, frac_part) = match unsigned.split_once('.') {
			Some((i, f)) => (i, Some(f)),
			None => (unsigned, None),
		};

		let mut grouped = String::new();
		for (i, c) in int_part.chars().enumerate() {
			if i > 0 && (int_part.len() - i) % 3 == 0 {
				grouped.push(',');
			}
			grouped.push(c);
		}

		match frac_part {
			Some(f) => format!("{}{}.{}", sign, grouped, f),
			None => format!("{}{}", sign, grouped),
		}
	}
}

impl fmt::Display for Amount<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.currency {
			Some(currency) => write!(f, "{} {}", self.grouped(), currency),
			None => write!(f, "{}", self.grouped()),
		}
	}
}
