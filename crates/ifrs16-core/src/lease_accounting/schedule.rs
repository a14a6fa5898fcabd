//! IFRS 16 lessee measurement: initial lease liability, right-of-use asset
//! cost and the annual amortisation schedule of the liability under the
//! effective interest method.
//!
//! Payments are made annually in arrears, so the initial liability is the
//! present value of an ordinary annuity discounted at the incremental
//! borrowing rate. No rounding is applied to any figure; callers round at
//! display time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LeaseError;
use crate::time_value::annuity_factor;
use crate::types::{Money, Rate};
use crate::LeaseResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Longest lease term accepted, in years.
pub const MAX_TERM_YEARS: u32 = 1_000;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Contractual terms of a lease, as seen by the lessee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseTerms {
    /// Number of annual periods
    pub term_years: u32,
    /// Fixed payment made at the end of each year
    pub annual_payment: Money,
    /// Incremental borrowing rate (e.g. 0.06 = 6%)
    pub discount_rate: Rate,
    /// Initial direct costs, capitalised into the right-of-use asset only
    #[serde(default)]
    pub initial_direct_costs: Money,
}

impl LeaseTerms {
    pub fn new(
        term_years: u32,
        annual_payment: Money,
        discount_rate: Rate,
        initial_direct_costs: Money,
    ) -> Self {
        Self {
            term_years,
            annual_payment,
            discount_rate,
            initial_direct_costs,
        }
    }

    /// Check every precondition shared by the calculator operations.
    pub fn validate(&self) -> LeaseResult<()> {
        if self.term_years == 0 {
            return Err(LeaseError::invalid(
                "term_years",
                "Lease term must be at least one year",
            ));
        }
        if self.term_years > MAX_TERM_YEARS {
            return Err(LeaseError::invalid(
                "term_years",
                format!("Lease term must not exceed {MAX_TERM_YEARS} years"),
            ));
        }
        if self.annual_payment < Decimal::ZERO {
            return Err(LeaseError::invalid(
                "annual_payment",
                "Annual payment must not be negative",
            ));
        }
        if self.discount_rate <= Decimal::ZERO {
            return Err(LeaseError::invalid(
                "discount_rate",
                "Incremental borrowing rate must be positive",
            ));
        }
        if self.initial_direct_costs < Decimal::ZERO {
            return Err(LeaseError::invalid(
                "initial_direct_costs",
                "Initial direct costs must not be negative",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A single year of the lease liability amortisation schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Year number (1-indexed)
    pub year: u32,
    /// Lease liability at the start of the year
    pub opening_liability: Money,
    /// Interest accrued on the opening balance
    pub interest: Money,
    /// Payment made at the end of the year
    pub payment: Money,
    /// Portion of the payment that reduces the liability
    pub principal_repaid: Money,
    /// Lease liability at the end of the year
    pub closing_liability: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Initial lease liability: present value of the payments as an ordinary
/// annuity, `payment * (1 - (1 + r)^-n) / r`.
pub fn compute_present_value(terms: &LeaseTerms) -> LeaseResult<Money> {
    terms.validate()?;
    let factor = annuity_factor(terms.discount_rate, terms.term_years)?;
    terms
        .annual_payment
        .checked_mul(factor)
        .ok_or_else(|| LeaseError::invalid("annual_payment", "Present value overflows"))
}

/// Right-of-use asset at commencement: lease liability plus initial direct costs.
pub fn compute_right_of_use_asset_cost(terms: &LeaseTerms) -> LeaseResult<Money> {
    let pv = compute_present_value(terms)?;
    pv.checked_add(terms.initial_direct_costs).ok_or_else(|| {
        LeaseError::invalid("initial_direct_costs", "Right-of-use asset cost overflows")
    })
}

/// Annual straight-line depreciation of the right-of-use asset over the lease term.
pub fn compute_straight_line_depreciation(terms: &LeaseTerms) -> LeaseResult<Money> {
    let cost = compute_right_of_use_asset_cost(terms)?;
    Ok(cost / Decimal::from(terms.term_years))
}

/// Build the year-by-year liability schedule.
///
/// Each closing balance carries forward unrounded as the next opening
/// balance, so the final closing balance runs off to zero.
pub fn build_schedule(terms: &LeaseTerms) -> LeaseResult<Vec<ScheduleRow>> {
    let present_value = compute_present_value(terms)?;
    let rate = terms.discount_rate;
    let payment = terms.annual_payment;

    let mut schedule = Vec::with_capacity(terms.term_years as usize);
    let mut liability = present_value;

    for year in 1..=terms.term_years {
        let opening = liability;
        let interest = opening * rate;
        let principal = payment - interest;
        let closing = opening - principal;

        schedule.push(ScheduleRow {
            year,
            opening_liability: opening,
            interest,
            payment,
            principal_repaid: principal,
            closing_liability: closing,
        });

        liability = closing;
    }

    tracing::debug!(
        term_years = terms.term_years,
        %present_value,
        final_closing = %liability,
        "built lease amortisation schedule"
    );

    Ok(schedule)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
