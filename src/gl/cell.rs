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
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One raw value read from the ledger. Values are classified once on load
/// and never modified afterwards; numbers keep the text they were read from,
/// so "01" and "1" stay distinct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
	Empty,
	Number { value: Decimal, raw: String },
	Text(String),
}

impl Cell {
	/// Classifies a raw field. Blank fields are empty, plain decimal literals
	/// (no grouping separators, no symbols) are numbers, and everything else
	/// is kept verbatim as text.
	pub fn from_raw(raw: &str) -> Self {
		let trimmed = raw.trim();
		if trimmed.is_empty() {
			return Cell::Empty;
		}

		if Cell::is_plain_number(trimmed) {
			if let Ok(value) = Decimal::from_str(trimmed) {
				return Cell::Number {
					value,
					raw: raw.to_string(),
				};
			}
		}

		Cell::Text(raw.to_string())
	}

	/// The value as a grouping key: the trimmed text as read. Empty cells
	/// have no key.
	pub fn key(&self) -> Option<String> {
		match self {
			Cell::Empty => None,
			Cell::Number { raw: s, .. } | Cell::Text(s) => {
				let trimmed = s.trim();
				if trimmed.is_empty() {
					None
				} else {
					Some(trimmed.to_string())
				}
			},
		}
	}

	fn is_plain_number(s: &str) -> bool {
		let digits = s.strip_prefix('-').unwrap_or(s);
		!digits.is_empty()
			&& digits.chars().any(|c| c.is_ascii_digit())
			&& digits.chars().all(|c| c.is_ascii_digit() || c == '.')
			&& digits.matches('.').count() <= 1
	}
}

impl fmt::Display for Cell {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Cell::Empty => Ok(()),
			Cell::Number { raw, .. } => write!(f, "{}", raw),
			Cell::Text(s) => write!(f, "{}", s),
		}
	}
}

impl Serialize for Cell {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Cell::Empty => serializer.serialize_none(),
			Cell::Number { raw: s, .. } | Cell::Text(s) => {
				serializer.serialize_str(s)
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_classification() {
		assert_eq!(Cell::from_raw(""), Cell::Empty);
		assert_eq!(Cell::from_raw("   "), Cell::Empty);
		assert_eq!(
			Cell::from_raw("500"),
			Cell::Number {
				value: Decimal::from(500),
				raw: "500".to_string(),
			}
		);
		assert_eq!(
			Cell::from_raw("-12.5"),
			Cell::Number {
				value: Decimal::from_str("-12.5").unwrap(),
				raw: "-12.5".to_string(),
			}
		);
		assert_eq!(
			Cell::from_raw("1,234.50"),
			Cell::Text("1,234.50".to_string())
		);
		assert_eq!(Cell::from_raw("1.2.3"), Cell::Text("1.2.3".to_string()));
		assert_eq!(Cell::from_raw("-"), Cell::Text("-".to_string()));
	}

	#[test]
	fn test_key_is_trimmed() {
		assert_eq!(
			Cell::from_raw("  Grants ").key(),
			Some("Grants".to_string())
		);
		assert_eq!(Cell::Empty.key(), None);
		assert_eq!(Cell::Text("  ".to_string()).key(), None);
	}

	#[test]
	fn test_numbers_keep_their_text() {
		let padded = Cell::from_raw("0012");
		assert_eq!(padded.to_string(), "0012");
		assert_eq!(padded.key(), Some("0012".to_string()));
		assert_ne!(Cell::from_raw("01").key(), Cell::from_raw("1").key());
		assert_ne!(Cell::from_raw("1.0").key(), Cell::from_raw("1").key());
		assert_eq!(Cell::from_raw(" 7 ").key(), Some("7".to_string()));
	}
}
