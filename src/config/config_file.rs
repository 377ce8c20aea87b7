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
use crate::gl::errors::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;

const DEFAULT_PROFILE: &str = "default";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub profiles: BTreeMap<String, LedgerProfile>,
}

impl Config {
	/// Picks the ledger profile to run with. An explicit name must exist.
	/// Without one, a profile called "default" wins, then a lone profile,
	/// then the built-in defaults.
	pub fn profile(&self, name: Option<&str>) -> Result<LedgerProfile, ConfigError> {
		if let Some(name) = name {
			return self
				.profiles
				.get(name)
				.cloned()
				.ok_or_else(|| ConfigError::UnknownProfile(name.to_string()));
		}

		if let Some(profile) = self.profiles.get(DEFAULT_PROFILE) {
			return Ok(profile.clone());
		}

		if self.profiles.len() == 1 {
			if let Some(profile) = self.profiles.values().next() {
				return Ok(profile.clone());
			}
		}

		Ok(LedgerProfile::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::gl::total::SignConvention;
	use crate::util::date::DateOrder;

	const TWO_PROFILES: &str = r#"
[profiles.VN]
debit_column = "Debit (VND)"
credit_column = "Credit (VND)"
currency = "VND"
revenue_expense_labels = ["VN - Expenses", "VN - Revenues"]

[profiles.BE]
debit_column = "Debit (EUR)"
credit_column = "Credit (EUR)"
date_order = "mdy"
fund_sign = "debit-minus-credit"

[[profiles.BE.summary_groups]]
title = "Bank Accounts"
pattern = "(?i)bank"
"#;

	#[test]
	fn test_named_profiles() {
		let config: Config = toml::from_str(TWO_PROFILES).unwrap();

		let vn = config.profile(Some("VN")).unwrap();
		assert_eq!(vn.debit_column, "Debit (VND)");
		assert_eq!(vn.account_column, "Account");
		assert_eq!(vn.currency.as_deref(), Some("VND"));
		assert_eq!(vn.fund_sign, SignConvention::CreditMinusDebit);

		let be = config.profile(Some("BE")).unwrap();
		assert_eq!(be.date_order, DateOrder::Mdy);
		assert_eq!(be.fund_sign, SignConvention::DebitMinusCredit);
		assert_eq!(be.summary_groups.len(), 1);
		assert_eq!(be.summary_groups[0].title, "Bank Accounts");
	}

	#[test]
	fn test_unknown_profile() {
		let config: Config = toml::from_str(TWO_PROFILES).unwrap();
		assert!(matches!(
			config.profile(Some("FR")),
			Err(ConfigError::UnknownProfile(_))
		));
	}

	#[test]
	fn test_fallbacks() {
		let empty: Config = toml::from_str("").unwrap();
		assert_eq!(empty.profile(None).unwrap().debit_column, "Debit");

		let single: Config =
			toml::from_str("[profiles.only]\ncurrency = \"EUR\"\n").unwrap();
		assert_eq!(single.profile(None).unwrap().currency.as_deref(), Some("EUR"));

		let config: Config = toml::from_str(TWO_PROFILES).unwrap();
		assert_eq!(config.profile(None).unwrap().debit_column, "Debit");
	}
}
