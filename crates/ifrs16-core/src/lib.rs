//! IFRS 16 lease accounting for lessees.
//!
//! Computes the initial lease liability, right-of-use asset cost, the
//! effective-interest amortisation schedule, straight-line depreciation and
//! the journals derived from them. Every calculation is a pure function of
//! [`LeaseTerms`] using 128-bit decimal arithmetic.

pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "lease_accounting")]
pub mod lease_accounting;

pub use error::LeaseError;

#[cfg(feature = "lease_accounting")]
pub use lease_accounting::schedule::{LeaseTerms, ScheduleRow};

pub type LeaseResult<T> = Result<T, LeaseError>;
