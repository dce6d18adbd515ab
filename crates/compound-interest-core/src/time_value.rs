use rust_decimal::Decimal;

use crate::error::CompoundInterestError;
use crate::types::Rate;
use crate::CompoundInterestResult;

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
///
/// Fails instead of panicking once the factor leaves the `Decimal` range.
pub fn compound(rate: Rate, n: u32) -> CompoundInterestResult<Decimal> {
    let factor = Decimal::ONE
        .checked_add(rate)
        .ok_or_else(|| CompoundInterestError::out_of_range("rate"))?;
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result
            .checked_mul(factor)
            .ok_or_else(|| CompoundInterestError::out_of_range("rate"))?;
    }
    Ok(result)
}

/// Effective annual rate of a periodic rate compounded `periods_per_year` times.
pub fn effective_annual_rate(
    periodic_rate: Rate,
    periods_per_year: u32,
) -> CompoundInterestResult<Rate> {
    if periods_per_year == 0 {
        return Err(CompoundInterestError::InvalidInput {
            field: "periods_per_year".into(),
            reason: "Compounding frequency must be > 0".into(),
        });
    }
    compound(periodic_rate, periods_per_year)?
        .checked_sub(Decimal::ONE)
        .ok_or_else(|| CompoundInterestError::out_of_range("rate"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compound_basic() {
        assert_eq!(compound(dec!(0.10), 2).unwrap(), dec!(1.21));
        assert_eq!(compound(dec!(0.05), 0).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_compound_overflow_is_an_error() {
        // 2^200 is far past Decimal::MAX (~7.9e28).
        let err = compound(Decimal::ONE, 200).unwrap_err();
        assert!(matches!(err, CompoundInterestError::InvalidInput { .. }));
        // Alternating sign with growing magnitude: (-3)^200.
        assert!(compound(dec!(-4), 200).is_err());
    }

    #[test]
    fn test_effective_annual_rate_monthly() {
        // 12% nominal compounded monthly ≈ 12.68% effective
        let ear = effective_annual_rate(dec!(0.01), 12).unwrap();
        assert!((ear - dec!(0.126825)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_effective_annual_rate_negative() {
        // -12% nominal: 0.99^12 - 1 ≈ -11.36%
        let ear = effective_annual_rate(dec!(-0.01), 12).unwrap();
        assert!((ear - dec!(-0.113615)).abs() < dec!(0.000001));
        // A monthly rate of -100% wipes the balance out.
        assert_eq!(effective_annual_rate(dec!(-1), 12).unwrap(), dec!(-1));
    }

    #[test]
    fn test_effective_annual_rate_overflow() {
        assert!(effective_annual_rate(dec!(1000000000000), 12).is_err());
    }

    #[test]
    fn test_effective_annual_rate_rejects_zero_periods() {
        assert!(effective_annual_rate(dec!(0.01), 0).is_err());
    }
}
