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
/// Characters that cannot appear in a report identifier.
const FORBIDDEN: [char; 6] = ['\\', '/', '?', '*', '[', ']'];

/// Replaces characters that are not allowed in report identifiers with a
/// space. The result doubles as a sheet or file name.
pub fn sheet_safe(key: &str) -> String {
	key.chars()
		.map(|c| if FORBIDDEN.contains(&c) { ' ' } else { c })
		.collect()
}

/// Loose equality between a bucket key and a requested name: both sides are
/// made sheet-safe, split into words, and words made only of punctuation
/// are dropped before comparing.
pub fn loose_eq(key: &str, name: &str) -> bool {
	let a = loose_words(key);
	!a.is_empty() && a == loose_words(name)
}

fn loose_words(s: &str) -> Vec<String> {
	sheet_safe(s)
		.split_whitespace()
		.filter(|word| word.chars().any(|c| c.is_alphanumeric()))
		.map(|word| word.to_string())
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_sheet_safe() {
		assert_eq!(sheet_safe("R/D [2024]"), "R D  2024 ");
		assert_eq!(sheet_safe("Legal & Admin"), "Legal & Admin");
	}

	#[test]
	fn test_loose_eq() {
		assert!(loose_eq("Legal & Admin", "Legal  Admin"));
		assert!(loose_eq("R/D", "R D"));
		assert!(loose_eq("Fund?", "Fund"));
		assert!(!loose_eq("Legal & Admin", "Legal"));
		assert!(!loose_eq("legal admin", "Legal Admin"));
		assert!(!loose_eq("&", "&"));
	}
}
