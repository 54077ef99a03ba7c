//! Amount conversion.

/// Convert `amount` at `rate` into whole local units.
///
/// Rounds half away from zero (`2.5` becomes `3`, `-2.5` becomes `-3`).
/// Returns `0` if either input, or their product, is not finite. Products
/// beyond the `i64` range saturate.
pub fn convert(amount: f64, rate: f64) -> i64 {
    if !amount.is_finite() || !rate.is_finite() {
        return 0;
    }

    let product = amount * rate;
    if !product.is_finite() {
        return 0;
    }

    product.round() as i64
}
