//! Validation of monetary amounts.

use crate::Error;

/// Check that `amount` is a positive, finite number.
///
/// `field` is the JSON field name reported back to the client on failure.
pub fn validate_amount(amount: f64, field: &'static str) -> Result<f64, Error> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount(field))
    }
}
