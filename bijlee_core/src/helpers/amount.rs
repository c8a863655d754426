use crate::error::TransferError;

/// Decimal precision of the Bijlee mint.
pub const BIJLEE_DECIMALS: u8 = 9;

/// Rejects non-finite, zero and negative amounts.
pub fn validate_amount(amount: f64) -> Result<(), TransferError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(TransferError::InvalidAmount);
    }
    Ok(())
}

/// Scales a user-entered decimal amount into integer base units,
/// `floor(amount * 10^decimals)`. The result must fit in a u64.
pub fn to_base_units(amount: f64, decimals: u8) -> Result<u64, TransferError> {
    validate_amount(amount)?;
    let scaled = (amount * 10f64.powi(decimals as i32)).floor();
    if scaled >= u64::MAX as f64 {
        return Err(TransferError::InvalidAmount);
    }
    Ok(scaled as u64)
}

/// Inverse of [`to_base_units`], for display.
pub fn from_base_units(amount: u64, decimals: u8) -> f64 {
    amount as f64 / 10f64.powi(decimals as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_whole_and_fractional_amounts() {
        assert_eq!(to_base_units(1.5, BIJLEE_DECIMALS).unwrap(), 1_500_000_000);
        assert_eq!(to_base_units(0.000000001, BIJLEE_DECIMALS).unwrap(), 1);
        assert_eq!(to_base_units(42.0, BIJLEE_DECIMALS).unwrap(), 42_000_000_000);
    }

    #[test]
    fn rejects_non_positive_amounts() {
        assert_eq!(to_base_units(0.0, BIJLEE_DECIMALS), Err(TransferError::InvalidAmount));
        assert_eq!(to_base_units(-1.0, BIJLEE_DECIMALS), Err(TransferError::InvalidAmount));
        assert_eq!(to_base_units(f64::NAN, BIJLEE_DECIMALS), Err(TransferError::InvalidAmount));
        assert_eq!(
            to_base_units(f64::INFINITY, BIJLEE_DECIMALS),
            Err(TransferError::InvalidAmount)
        );
    }

    #[test]
    fn display_scaling_is_reversible() {
        let units = to_base_units(12.345, BIJLEE_DECIMALS).unwrap();
        assert_eq!(units, 12_345_000_000);
        assert!((from_base_units(units, BIJLEE_DECIMALS) - 12.345).abs() < 1e-9);
    }
}
