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
use anyhow::{bail, Error};
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;

/// Order of the day, month and year fields in ledger dates that are not in
/// ISO form.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DateOrder {
	#[default]
	Dmy,
	Mdy,
	Ymd,
}

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Date {
	year: u32,
	month: u8,
	day: u8,
}

impl Date {
	/// Parses a date as it appears in a ledger cell. Four-digit leading years
	/// are always read as year-month-day; other triples follow `order`. Two
	/// digit years belong to the 2000s. Anything after the first whitespace,
	/// such as a time of day, is ignored.
	pub fn from_ledger_str(raw: &str, order: DateOrder) -> Result<Date, Error> {
		let date_part = raw.split_whitespace().next().unwrap_or("");
		let parts: Vec<&str> =
			date_part.split(|c| matches!(c, '/' | '-' | '.')).collect();
		if parts.len() != 3 {
			bail!("Unrecognized date: {}", raw);
		}

		if parts[0].len() == 4 {
			return Date::from_parts(parts[0], parts[1], parts[2]);
		}

		match order {
			DateOrder::Dmy => Date::from_parts(parts[2], parts[1], parts[0]),
			DateOrder::Mdy => Date::from_parts(parts[2], parts[0], parts[1]),
			DateOrder::Ymd => Date::from_parts(parts[0], parts[1], parts[2]),
		}
	}

	fn from_parts(year: &str, month: &str, day: &str) -> Result<Date, Error> {
		let mut year = year.parse::<u32>()?;
		let month = month.parse::<u8>()?;
		let day = day.parse::<u8>()?;

		if year < 100 {
			year += 2000;
		}

		// Validate the date
		if !Date::is_valid_date(year, month, day) {
			bail!("Invalid date");
		}

		Ok(Date { year, month, day })
	}

	fn is_leap_year(year: u32) -> bool {
		(year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
	}

	fn days_in_month(year: u32, month: u8) -> u8 {
		match month {
			1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
			4 | 6 | 9 | 11 => 30,
			2 => {
				if Date::is_leap_year(year) {
					29
				} else {
					28
				}
			},
			_ => 0, // Invalid month
		}
	}

	fn is_valid_date(year: u32, month: u8, day: u8) -> bool {
		if !(1..=12).contains(&month) {
			return false;
		}
		if day < 1 || day > Date::days_in_month(year, month) {
			return false;
		}
		true
	}
}

impl PartialOrd for Date {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Date {
	fn cmp(&self, other: &Self) -> Ordering {
		(self.year, self.month, self.day).cmp(&(
			other.year,
			other.month,
			other.day,
		))
	}
}

impl fmt::Display for Date {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
	}
}
