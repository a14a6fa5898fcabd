//! Full lessee measurement report: liability schedule, right-of-use asset
//! roll-forward, cumulative totals and the journals for every year.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::journal::{
    commencement_entry, derive_journal_values, periodic_entries, JournalEntry,
    JournalEntryValues,
};
use super::schedule::{
    build_schedule, compute_right_of_use_asset_cost, compute_straight_line_depreciation,
    LeaseTerms, ScheduleRow,
};
use crate::error::LeaseError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LeaseResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseMeasurementOutput {
    /// Initial lease liability
    pub present_value: Money,
    /// ROU asset at commencement (liability + initial direct costs)
    pub right_of_use_asset_cost: Money,
    /// Annual depreciation of the ROU asset
    pub straight_line_depreciation: Money,
    /// Undiscounted total of all payments
    pub total_payments: Money,
    /// Total interest over the lease term
    pub total_interest: Money,
    /// Total depreciation over the lease term
    pub total_depreciation: Money,
    pub schedule: Vec<ScheduleRow>,
    pub cumulative: Vec<CumulativeRow>,
    pub right_of_use: Vec<RightOfUseRow>,
    pub commencement_entry: JournalEntry,
    pub journals: Vec<PeriodJournal>,
}

/// Running totals of interest and principal up to the end of a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativeRow {
    pub year: u32,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

/// Right-of-use asset carrying amount for a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RightOfUseRow {
    pub year: u32,
    pub opening_carrying_amount: Money,
    pub depreciation: Money,
    pub closing_carrying_amount: Money,
}

/// Journals posted in one year of the lease.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodJournal {
    pub year: u32,
    pub values: JournalEntryValues,
    pub entries: Vec<JournalEntry>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Measure a lease at commencement and over its term.
pub fn measure_lease(
    terms: &LeaseTerms,
) -> LeaseResult<ComputationOutput<LeaseMeasurementOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let schedule = build_schedule(terms)?;

    if terms.annual_payment.is_zero() {
        warnings.push("Annual payment is zero; lease liability and interest are nil.".into());
    }
    if terms.discount_rate >= Decimal::ONE {
        warnings.push(format!(
            "Discount rate of {} is 100% or more; check it is expressed as a decimal.",
            terms.discount_rate
        ));
    }

    let present_value = schedule
        .first()
        .map(|r| r.opening_liability)
        .unwrap_or(Decimal::ZERO);
    let rou_cost = compute_right_of_use_asset_cost(terms)?;
    let depreciation = compute_straight_line_depreciation(terms)?;
    let term = Decimal::from(terms.term_years);

    let total_payments = terms
        .annual_payment
        .checked_mul(term)
        .ok_or_else(|| LeaseError::invalid("annual_payment", "Total payments overflow"))?;
    let total_depreciation = depreciation.checked_mul(term).ok_or_else(|| {
        LeaseError::invalid("initial_direct_costs", "Total depreciation overflows")
    })?;

    let mut cumulative = Vec::with_capacity(schedule.len());
    let mut right_of_use = Vec::with_capacity(schedule.len());
    let mut journals = Vec::with_capacity(schedule.len());

    let mut cum_interest = Decimal::ZERO;
    let mut cum_principal = Decimal::ZERO;
    let mut carrying = rou_cost;

    for row in &schedule {
        cum_interest = cum_interest.checked_add(row.interest).ok_or_else(|| {
            LeaseError::invalid("annual_payment", "Cumulative interest overflows")
        })?;
        cum_principal = cum_principal.checked_add(row.principal_repaid).ok_or_else(|| {
            LeaseError::invalid("annual_payment", "Cumulative principal overflows")
        })?;
        cumulative.push(CumulativeRow {
            year: row.year,
            cumulative_interest: cum_interest,
            cumulative_principal: cum_principal,
        });

        let opening_carrying = carrying;
        carrying -= depreciation;
        right_of_use.push(RightOfUseRow {
            year: row.year,
            opening_carrying_amount: opening_carrying,
            depreciation,
            closing_carrying_amount: carrying,
        });

        let values = derive_journal_values(row, depreciation);
        let entries = periodic_entries(row.year, &values).to_vec();
        journals.push(PeriodJournal {
            year: row.year,
            values,
            entries,
        });
    }

    let output = LeaseMeasurementOutput {
        present_value,
        right_of_use_asset_cost: rou_cost,
        straight_line_depreciation: depreciation,
        total_payments,
        total_interest: cum_interest,
        total_depreciation,
        schedule,
        cumulative,
        right_of_use,
        commencement_entry: commencement_entry(
            present_value,
            terms.initial_direct_costs,
            rou_cost,
        ),
        journals,
    };

    for w in &warnings {
        tracing::warn!(warning = %w, "lease measurement");
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "IFRS 16 lessee model: ordinary annuity present value, effective interest \
         amortisation, straight-line right-of-use depreciation",
        terms,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lease_accounting::schedule::compute_present_value;
    use rust_decimal_macros::dec;

    fn equipment_lease() -> LeaseTerms {
        LeaseTerms::new(5, dec!(10000), dec!(0.05), dec!(1500))
    }

    #[test]
    fn test_report_lengths() {
        let out = measure_lease(&equipment_lease()).unwrap();
        let r = &out.result;
        assert_eq!(r.schedule.len(), 5);
        assert_eq!(r.cumulative.len(), 5);
        assert_eq!(r.right_of_use.len(), 5);
        assert_eq!(r.journals.len(), 5);
        assert!(r.journals.iter().all(|j| j.entries.len() == 2));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_rou_runs_down_to_zero() {
        let out = measure_lease(&equipment_lease()).unwrap();
        let last = out.result.right_of_use.last().unwrap();
        assert!(last.closing_carrying_amount.abs() < dec!(0.000001));
        assert_eq!(
            out.result.right_of_use[0].opening_carrying_amount,
            out.result.right_of_use_asset_cost
        );
    }

    #[test]
    fn test_cumulative_principal_repays_liability() {
        let out = measure_lease(&equipment_lease()).unwrap();
        let last = out.result.cumulative.last().unwrap();
        assert!((last.cumulative_principal - out.result.present_value).abs() < dec!(0.000001));
        assert_eq!(last.cumulative_interest, out.result.total_interest);
        // interest + principal = total payments
        let total = last.cumulative_interest + last.cumulative_principal;
        assert!((total - out.result.total_payments).abs() < dec!(0.000001));
    }

    #[test]
    fn test_zero_payment_warns() {
        let terms = LeaseTerms::new(3, Decimal::ZERO, dec!(0.05), dec!(100));
        let out = measure_lease(&terms).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.result.right_of_use_asset_cost, dec!(100));
    }

    #[test]
    fn test_percentage_style_rate_warns() {
        let terms = LeaseTerms::new(3, dec!(100), dec!(6), Decimal::ZERO);
        let out = measure_lease(&terms).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("100%")));
    }

    #[test]
    fn test_invalid_terms_produce_no_report() {
        let terms = LeaseTerms::new(0, dec!(100), dec!(0.05), Decimal::ZERO);
        assert!(measure_lease(&terms).is_err());
    }

    #[test]
    fn test_total_payments_overflow_is_an_error() {
        // Liability (~7.36e28) fits; ten undiscounted payments (1e29) do not
        let terms = LeaseTerms::new(
            10,
            dec!(10000000000000000000000000000),
            dec!(0.06),
            Decimal::ZERO,
        );
        assert!(compute_present_value(&terms).is_ok());
        match measure_lease(&terms).unwrap_err() {
            LeaseError::InvalidInput { field, .. } => assert_eq!(field, "annual_payment"),
        }
    }

    #[test]
    fn test_direct_costs_overflow_is_an_error() {
        let terms = LeaseTerms::new(20, dec!(80000), dec!(0.06), Decimal::MAX);
        match measure_lease(&terms).unwrap_err() {
            LeaseError::InvalidInput { field, .. } => assert_eq!(field, "initial_direct_costs"),
        }
    }
}
