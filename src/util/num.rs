/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `f64` to `u64` if the value is finite, non-negative,
/// within the exactly representable range, and not fractional.
///
/// ## Errors
/// Returns `Err(error)` for non-finite, negative, out-of-range, or fractional
/// values.
///
/// ## Example
/// ```
/// use scenegen::util::num::f64_to_u64_checked;
///
/// assert_eq!(f64_to_u64_checked(42.0, "bad seed"), Ok(42));
/// assert_eq!(f64_to_u64_checked(-5.0, "bad seed"), Err("bad seed"));
/// assert_eq!(f64_to_u64_checked(1.23, "bad seed"), Err("bad seed"));
/// assert_eq!(f64_to_u64_checked(f64::NAN, "bad seed"), Err("bad seed"));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
pub fn f64_to_u64_checked<E>(value: f64, error: E) -> Result<u64, E> {
    if !value.is_finite() || value < 0.0 || value > MAX_SAFE_U64_INT as f64 {
        return Err(error);
    }
    if value.fract() != 0.0 {
        return Err(error);
    }
    Ok(value as u64)
}

/// Safely converts an `f64` to a `usize` count.
///
/// Same rules as [`f64_to_u64_checked`], plus the result must fit in `usize`.
///
/// ## Errors
/// Returns `Err(error)` if the value is not a non-negative whole number that
/// fits.
///
/// ## Example
/// ```
/// use scenegen::util::num::f64_to_usize_checked;
///
/// assert_eq!(f64_to_usize_checked(12.0, ()), Ok(12));
/// assert!(f64_to_usize_checked(2.5, ()).is_err());
/// ```
pub fn f64_to_usize_checked<E>(value: f64, error: E) -> Result<usize, E> {
    let wide = match f64_to_u64_checked(value, ()) {
        Ok(wide) => wide,
        Err(()) => return Err(error),
    };
    usize::try_from(wide).map_or(Err(error), Ok)
}

/// Converts a `usize` to `f64`.
///
/// Every count this crate produces is bounded far below `2^53`, so the
/// conversion is exact in practice; values above [`MAX_SAFE_U64_INT`] are
/// rounded.
///
/// ## Example
/// ```
/// use scenegen::util::num::usize_to_f64;
///
/// assert_eq!(usize_to_f64(100), 100.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}
