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
use serde_json::Value;
use std::fs;
use std::process::{Command, Output};

const LEDGER: &str = "tests/test_data/ledger.csv";
const CONFIG: &str = "tests/test_data/config.toml";

/// Runs the binary against a ledger, always with an explicit config so a
/// config in the home directory never leaks into the tests.
fn execute(ledger: &str, config: &str, cmd: &str, args: Vec<&str>) -> Output {
	let all_args =
		[vec!["-f", ledger, "--config", config, cmd], args].concat();

	Command::new(env!("CARGO_BIN_EXE_fundr"))
		.args(all_args)
		.env_remove("RUST_LOG")
		.output()
		.expect("Failed to execute process")
}

fn succeed(output: Output) -> String {
	assert!(
		output.status.success(),
		"failed processing: {}",
		String::from_utf8_lossy(&output.stderr)
	);
	String::from_utf8_lossy(&output.stdout).to_string()
}

fn json(output: Output) -> Value {
	serde_json::from_str(&succeed(output)).expect("Output was not JSON")
}

/// Decimal amounts are serialized as strings.
fn num(value: &Value) -> f64 {
	value
		.as_str()
		.expect("amount is not a string")
		.parse()
		.expect("amount is not numeric")
}

fn ids(doc: &Value) -> Vec<String> {
	doc["reports"]
		.as_array()
		.unwrap()
		.iter()
		.map(|r| r["id"].as_str().unwrap().to_string())
		.collect()
}

#[test]
fn test_integration_funds() {
	let doc = json(execute(LEDGER, CONFIG, "funds", vec!["--format", "json"]));

	assert_eq!(ids(&doc), vec!["Fund - Grants", "Fund - Unrestricted"]);
	assert_eq!(doc["produced"].as_array().unwrap().len(), 2);

	let grants = &doc["reports"][0];
	// the Bank deposit is not a revenue or expense row
	assert_eq!(grants["rows"].as_array().unwrap().len(), 2);
	// sorted by date: the donation on the 2nd comes first
	assert_eq!(grants["rows"][0]["line"], 3);
	assert_eq!(grants["rows"][1]["line"], 2);
	assert_eq!(num(&grants["totals"]["total_debit"]), 1200.0);
	assert_eq!(num(&grants["totals"]["total_credit"]), 5000.0);
	assert_eq!(num(&grants["totals"]["remaining"]), 3800.0);

	let unrestricted = &doc["reports"][1];
	assert_eq!(num(&unrestricted["totals"]["remaining"]), 200.0);
}

#[test]
fn test_integration_accounts() {
	let doc =
		json(execute(LEDGER, CONFIG, "accounts", vec!["--format", "json"]));

	assert_eq!(ids(&doc), vec!["Expenses", "Revenues", "Bank"]);

	// accounts remain debit minus credit
	let remaining: Vec<f64> = doc["reports"]
		.as_array()
		.unwrap()
		.iter()
		.map(|r| num(&r["totals"]["remaining"]))
		.collect();
	assert_eq!(remaining, vec![2000.0, -6000.0, 5000.0]);
}

#[test]
fn test_integration_table_output() {
	let stdout = succeed(execute(LEDGER, CONFIG, "funds", vec!["Grants"]));

	assert!(stdout.starts_with("Fund - Grants\n"));
	assert!(stdout.contains("TOTALS:"));
	assert!(stdout.contains("3,800.00 USD"));
	assert!(!stdout.contains("Unrestricted"));
	assert!(stdout.contains("Done: 1 report(s) rebuilt (last update "));
}

#[test]
fn test_integration_single_by_identifier() {
	let doc = json(execute(
		LEDGER,
		CONFIG,
		"funds",
		vec!["Fund - Unrestricted", "--format", "json"],
	));
	assert_eq!(ids(&doc), vec!["Fund - Unrestricted"]);
}

#[test]
fn test_integration_not_found() {
	let stdout = succeed(execute(LEDGER, CONFIG, "funds", vec!["Travel"]));
	assert!(stdout.contains("No data found for fund 'Travel'"));
	assert!(stdout.contains("Done: 0 report(s) rebuilt"));

	let doc = json(execute(
		LEDGER,
		CONFIG,
		"accounts",
		vec!["Travel", "--format", "json"],
	));
	assert_eq!(doc["not_found"][0], "Travel");
	assert_eq!(doc["reports"].as_array().unwrap().len(), 0);
}

#[test]
fn test_integration_should_fail() {
	let output = execute(
		"tests/test_data/missing_column.csv",
		CONFIG,
		"funds",
		vec![],
	);
	assert!(!output.status.success(), "missing column unexpectedly succeeded");
	assert!(output.stdout.is_empty());
	assert!(String::from_utf8_lossy(&output.stderr).contains("'Funds'"));

	let output = execute(LEDGER, CONFIG, "funds", vec!["-p", "nonexistent"]);
	assert!(!output.status.success(), "unknown profile unexpectedly succeeded");

	let output = execute(LEDGER, CONFIG, "summary", vec!["Grants"]);
	assert!(!output.status.success(), "summary with a name unexpectedly succeeded");
}

#[test]
fn test_integration_summary() {
	let doc = json(execute(LEDGER, CONFIG, "summary", vec!["--format", "json"]));
	let summary = &doc["summary"];

	assert_eq!(summary["title"], "Test Charity");
	assert_eq!(summary["funds"]["lines"][0]["name"], "Grants");
	assert_eq!(summary["funds"]["lines"][0]["report_id"], "Fund - Grants");
	assert_eq!(num(&summary["funds"]["grand_total"]["remaining"]), 4000.0);

	assert_eq!(summary["accounts"][0]["title"], "Revenues & Expenses");
	assert_eq!(summary["accounts"][0]["lines"].as_array().unwrap().len(), 2);
	assert_eq!(summary["accounts"][1]["title"], "Custodian Accounts");
	assert_eq!(summary["accounts"][1]["lines"][0]["name"], "Bank");
	assert_eq!(doc["produced"][0], "Summary");

	let stdout = succeed(execute(LEDGER, CONFIG, "summary", vec![]));
	assert!(stdout.starts_with("TEST CHARITY\nCOMPREHENSIVE FINANCIAL SUMMARY REPORT\n"));
	assert!(stdout.contains("II. Custodian Accounts"));
}

#[test]
fn test_integration_check() {
	let doc = json(execute(LEDGER, CONFIG, "check", vec!["--format", "json"]));

	assert_eq!(doc["rows"], 5);
	assert_eq!(doc["accounts"], 3);
	assert_eq!(doc["funds"], 2);
	assert_eq!(doc["first_date"], "2024-01-02");
	assert_eq!(doc["last_date"], "2024-01-20");
	assert_eq!(doc["diagnostics"]["unparseable_amounts"], 0);
}

#[test]
fn test_integration_out_dir() {
	let dir = tempfile::tempdir().unwrap();
	let out = dir.path().join("reports");
	let out_arg = out.display().to_string();

	succeed(execute(LEDGER, CONFIG, "funds", vec!["-o", out_arg.as_str()]));

	let grants = fs::read_to_string(out.join("Fund - Grants.csv")).unwrap();
	assert!(grants.starts_with("Date,Account,Funds,Description,Debit,Credit\n"));
	assert!(grants.contains("REMAINING:"));
	assert!(out.join("Fund - Unrestricted.csv").exists());
}

#[test]
fn test_integration_other_profile() {
	let doc = json(execute(
		"tests/test_data/semicolon.csv",
		"tests/test_data/dutch.toml",
		"funds",
		vec!["--delimiter", ";", "--format", "json"],
	));

	assert_eq!(ids(&doc), vec!["Fonds - Projecten"]);
	let report = &doc["reports"][0];
	assert_eq!(report["rows"][0]["cells"][1], "Opbrengsten");
	assert_eq!(num(&report["totals"]["total_debit"]), 1250.5);
	assert_eq!(num(&report["totals"]["remaining"]), 749.5);
}

#[test]
fn test_integration_latin1_export() {
	let doc = json(execute(
		"tests/test_data/latin1.csv",
		CONFIG,
		"funds",
		vec!["--format", "json"],
	));

	assert_eq!(ids(&doc), vec!["Fund - Caf\u{FFFD}s"]);
	let report = &doc["reports"][0];
	assert_eq!(report["rows"].as_array().unwrap().len(), 2);
	assert_eq!(report["rows"][1]["line"], 3);
	assert_eq!(num(&report["totals"]["remaining"]), 180.0);
}
