use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use ifrs16_core::lease_accounting::journal;
use ifrs16_core::lease_accounting::measurement;
use ifrs16_core::lease_accounting::schedule::{self, LeaseTerms};

use crate::input;

/// Lease terms, given as flags, a JSON/YAML file, or piped JSON on stdin
#[derive(Args)]
pub struct LeaseArgs {
    /// Lease term in whole years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Fixed payment made at the end of each year
    #[arg(long)]
    pub annual_payment: Option<Decimal>,

    /// Incremental borrowing rate (e.g. 0.06 for 6%)
    #[arg(long, alias = "ibr")]
    pub discount_rate: Option<Decimal>,

    /// Initial direct costs capitalised into the right-of-use asset
    #[arg(long)]
    pub initial_direct_costs: Option<Decimal>,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl LeaseArgs {
    fn has_flags(&self) -> bool {
        self.term_years.is_some()
            || self.annual_payment.is_some()
            || self.discount_rate.is_some()
            || self.initial_direct_costs.is_some()
    }
}

fn resolve_terms(args: LeaseArgs) -> Result<LeaseTerms, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_terms(path);
    }
    if args.has_flags() {
        return Ok(LeaseTerms {
            term_years: args
                .term_years
                .ok_or("--term-years is required (or provide --input)")?,
            annual_payment: args
                .annual_payment
                .ok_or("--annual-payment is required (or provide --input)")?,
            discount_rate: args
                .discount_rate
                .ok_or("--discount-rate is required (or provide --input)")?,
            initial_direct_costs: args.initial_direct_costs.unwrap_or(Decimal::ZERO),
        });
    }
    if let Some(terms) = input::stdin::read_stdin()? {
        return Ok(terms);
    }
    Err("lease terms required: pass --term-years, --annual-payment and --discount-rate, \
         --input <file>, or pipe JSON on stdin"
        .into())
}

pub fn run_schedule(args: LeaseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(args)?;
    let result = measurement::measure_lease(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_present_value(args: LeaseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(args)?;
    let pv = schedule::compute_present_value(&terms)?;
    Ok(json!({ "present_value": pv }))
}

pub fn run_depreciation(args: LeaseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(args)?;
    let cost = schedule::compute_right_of_use_asset_cost(&terms)?;
    let dep = schedule::compute_straight_line_depreciation(&terms)?;
    Ok(json!({
        "straight_line_depreciation": dep,
        "right_of_use_asset_cost": cost,
        "term_years": terms.term_years,
    }))
}

pub fn run_journals(args: LeaseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(args)?;
    let report = measurement::measure_lease(&terms)?.result;

    let mut entries = vec![report.commencement_entry];
    entries.extend(report.journals.into_iter().flat_map(|p| p.entries));

    let lines: Vec<Value> = entries
        .iter()
        .flat_map(|entry| {
            entry.lines.iter().map(move |line| {
                json!({
                    "year": entry.year,
                    "description": entry.description,
                    "account_code": line.account.code(),
                    "account": line.account.name(),
                    "side": line.side,
                    "amount": line.amount,
                    "memo": line.memo,
                })
            })
        })
        .collect();

    Ok(json!({ "journal_lines": lines }))
}

pub fn run_accounts() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(journal::chart_of_accounts())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn flags(
        term_years: Option<u32>,
        annual_payment: Option<Decimal>,
        discount_rate: Option<Decimal>,
    ) -> LeaseArgs {
        LeaseArgs {
            term_years,
            annual_payment,
            discount_rate,
            initial_direct_costs: None,
            input: None,
        }
    }

    #[test]
    fn test_flags_resolve_with_zero_direct_costs() {
        let args = flags(Some(20), Some(dec!(80000)), Some(dec!(0.06)));
        let terms = resolve_terms(args).unwrap();
        assert_eq!(terms, LeaseTerms::new(20, dec!(80000), dec!(0.06), Decimal::ZERO));
    }

    #[test]
    fn test_direct_costs_flag_is_carried() {
        let mut args = flags(Some(5), Some(dec!(10000)), Some(dec!(0.05)));
        args.initial_direct_costs = Some(dec!(1500));
        let terms = resolve_terms(args).unwrap();
        assert_eq!(terms.initial_direct_costs, dec!(1500));
    }

    #[test]
    fn test_missing_flag_is_named() {
        let err = resolve_terms(flags(Some(20), None, Some(dec!(0.06))))
            .unwrap_err()
            .to_string();
        assert!(err.contains("--annual-payment is required"), "got: {err}");

        let err = resolve_terms(flags(Some(20), Some(dec!(80000)), None))
            .unwrap_err()
            .to_string();
        assert!(err.contains("--discount-rate is required"), "got: {err}");

        // Any single flag selects the flag path
        let mut only_costs = flags(None, None, None);
        only_costs.initial_direct_costs = Some(dec!(100));
        let err = resolve_terms(only_costs).unwrap_err().to_string();
        assert!(err.contains("--term-years is required"), "got: {err}");
    }

    #[test]
    fn test_input_file_wins_over_flags() {
        let path = std::env::temp_dir().join(format!(
            "ifrs16-{}-resolve.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{"term_years": 3, "annual_payment": "500", "discount_rate": "0.04"}"#,
        )
        .unwrap();

        let mut args = flags(Some(20), Some(dec!(80000)), Some(dec!(0.06)));
        args.input = Some(path.to_str().unwrap().to_string());
        let terms = resolve_terms(args).unwrap();
        assert_eq!(terms.term_years, 3);
        assert_eq!(terms.annual_payment, dec!(500));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_present_value_command_reports_liability() {
        let args = flags(Some(1), Some(dec!(1100)), Some(dec!(0.10)));
        let value = run_present_value(args).unwrap();
        assert!(value.get("present_value").is_some());
    }
}
