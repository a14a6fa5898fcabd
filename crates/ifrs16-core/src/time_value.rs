use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::LeaseError;
use crate::types::{Money, Rate};
use crate::LeaseResult;

fn check_rate(rate: Rate) -> LeaseResult<()> {
    if rate <= dec!(-1) {
        return Err(LeaseError::invalid(
            "rate",
            "Discount rate must be greater than -100%",
        ));
    }
    Ok(())
}

/// Discount factor `(1 + rate)^-periods` for an end-of-period cash flow.
///
/// Built from repeated multiplication of `1 / (1 + rate)`, so for positive
/// rates the factor only ever shrinks and cannot leave the decimal range.
pub fn discount_factor(rate: Rate, periods: u32) -> LeaseResult<Decimal> {
    check_rate(rate)?;

    let one_period = Decimal::ONE / (Decimal::ONE + rate);
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor = factor
            .checked_mul(one_period)
            .ok_or_else(|| LeaseError::invalid("rate", "Discount factor overflows"))?;
    }
    Ok(factor)
}

/// Ordinary annuity factor `(1 - (1 + rate)^-n) / rate`.
///
/// A zero rate degenerates to the number of periods.
pub fn annuity_factor(rate: Rate, periods: u32) -> LeaseResult<Decimal> {
    if rate.is_zero() {
        return Ok(Decimal::from(periods));
    }
    let v_n = discount_factor(rate, periods)?;
    Ok((Decimal::ONE - v_n) / rate)
}

/// Present value of payments made at the end of periods 1..=n, each
/// discounted individually.
pub fn pv_of_payment_stream(rate: Rate, payments: &[Money]) -> LeaseResult<Money> {
    check_rate(rate)?;

    let one_period = Decimal::ONE / (Decimal::ONE + rate);
    let mut factor = Decimal::ONE;
    let mut pv = Decimal::ZERO;
    for payment in payments {
        factor = factor
            .checked_mul(one_period)
            .ok_or_else(|| LeaseError::invalid("rate", "Discount factor overflows"))?;
        let discounted = payment
            .checked_mul(factor)
            .ok_or_else(|| LeaseError::invalid("payment", "Discounted payment overflows"))?;
        pv = pv
            .checked_add(discounted)
            .ok_or_else(|| LeaseError::invalid("payment", "Present value overflows"))?;
    }
    Ok(pv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_discount_factor_one_period() {
        let v = discount_factor(dec!(0.25), 1).unwrap();
        assert_eq!(v, dec!(0.8));
    }

    #[test]
    fn test_discount_factor_zero_periods() {
        assert_eq!(discount_factor(dec!(0.06), 0).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_annuity_factor_basic() {
        // 6% over 20 years: (1 - 1.06^-20) / 0.06 ~ 11.4699
        let af = annuity_factor(dec!(0.06), 20).unwrap();
        assert!((af - dec!(11.4699)).abs() < dec!(0.0001), "got {af}");
    }

    #[test]
    fn test_annuity_factor_zero_rate() {
        assert_eq!(annuity_factor(Decimal::ZERO, 7).unwrap(), dec!(7));
    }

    #[test]
    fn test_payment_stream_matches_annuity() {
        let payments = vec![dec!(100); 10];
        let stream = pv_of_payment_stream(dec!(0.08), &payments).unwrap();
        let closed = dec!(100) * annuity_factor(dec!(0.08), 10).unwrap();
        assert!((stream - closed).abs() < dec!(0.000001));
        // 100 * (1 - 1/1.08^10) / 0.08 ~ 671.01
        assert!((stream - dec!(671.01)).abs() < dec!(0.01));
    }

    #[test]
    fn test_rate_below_minus_one_rejected() {
        assert!(discount_factor(dec!(-1), 3).is_err());
        assert!(pv_of_payment_stream(dec!(-1.5), &[dec!(10)]).is_err());
    }

    #[test]
    fn test_negative_rate_growth_is_an_error() {
        // -99% grows the factor 100x per period
        let payments = vec![Decimal::ONE; 100];
        match pv_of_payment_stream(dec!(-0.99), &payments).unwrap_err() {
            LeaseError::InvalidInput { field, .. } => assert_eq!(field, "rate"),
        }
        assert!(annuity_factor(dec!(-0.99), 100).is_err());
    }

    #[test]
    fn test_long_horizon_does_not_overflow() {
        let v = discount_factor(dec!(1.0), 1000).unwrap();
        assert!(v >= Decimal::ZERO && v < dec!(0.0000001));
    }
}
