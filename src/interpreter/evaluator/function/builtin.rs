use crate::interpreter::namespace::MathFault;

/// Result type returned by every builtin.
///
/// The evaluator checks arity before calling a builtin. Called directly with
/// the wrong number of arguments, a builtin returns [`MathFault::Domain`].
pub type BuiltinResult = Result<f64, MathFault>;

/// Applies a unary real function that is total on the reals.
///
/// The generated functions take exactly one argument. Overflow (e.g.
/// `exp(1000)`) is left to the evaluator's finiteness check.
///
/// # Example
/// ```
/// use scenegen::interpreter::evaluator::function::builtin::sin;
///
/// let r = sin(&[std::f64::consts::PI / 2.0]).unwrap();
/// assert_eq!(r, 1.0);
/// ```
macro_rules! total_builtin {
    ($fname:ident, $real_fn:ident) => {
        pub fn $fname(args: &[f64]) -> BuiltinResult {
            let &[x] = args else {
                return Err(MathFault::Domain);
            };
            Ok(x.$real_fn())
        }
    };
}

total_builtin!(sin, sin);
total_builtin!(cos, cos);
total_builtin!(tan, tan);
total_builtin!(exp, exp);
total_builtin!(abs, abs);

/// Square root of a non-negative number.
///
/// # Errors
/// [`MathFault::Domain`] for negative input.
///
/// # Example
/// ```
/// use scenegen::interpreter::{evaluator::function::builtin::sqrt, namespace::MathFault};
///
/// assert_eq!(sqrt(&[9.0]), Ok(3.0));
/// assert_eq!(sqrt(&[-1.0]), Err(MathFault::Domain));
/// ```
pub fn sqrt(args: &[f64]) -> BuiltinResult {
    let &[x] = args else {
        return Err(MathFault::Domain);
    };
    if x < 0.0 {
        return Err(MathFault::Domain);
    }
    Ok(x.sqrt())
}

/// Natural logarithm, or logarithm in an explicit base.
///
/// `log(x)` is `ln x`; `log(x, b)` is `ln x / ln b`.
///
/// # Errors
/// - [`MathFault::Domain`] if `x <= 0` or `b <= 0`.
/// - [`MathFault::DivisionByZero`] if `b == 1`.
///
/// # Example
/// ```
/// use scenegen::interpreter::evaluator::function::builtin::log;
///
/// assert!((log(&[100.0, 10.0]).unwrap() - 2.0).abs() < 1e-12);
/// assert!(log(&[0.0]).is_err());
/// ```
pub fn log(args: &[f64]) -> BuiltinResult {
    match *args {
        [x] if x > 0.0 => Ok(x.ln()),
        [x, base] if x > 0.0 && base > 0.0 => {
            let ln_base = base.ln();
            if ln_base == 0.0 {
                return Err(MathFault::DivisionByZero);
            }
            Ok(x.ln() / ln_base)
        },
        _ => Err(MathFault::Domain),
    }
}

/// Raises `args[0]` to the power `args[1]`.
///
/// Shared by the `pow` builtin and the `^` / `**` operators.
///
/// # Errors
/// - [`MathFault::DivisionByZero`] for a zero base with a negative exponent.
/// - [`MathFault::Domain`] when the real result does not exist (negative
///   base with a fractional exponent).
pub fn pow(args: &[f64]) -> BuiltinResult {
    let &[base, exponent] = args else {
        return Err(MathFault::Domain);
    };
    if base == 0.0 && exponent < 0.0 {
        return Err(MathFault::DivisionByZero);
    }

    let result = base.powf(exponent);
    if result.is_nan() {
        return Err(MathFault::Domain);
    }
    Ok(result)
}

/// Smallest of the arguments.
pub fn min(args: &[f64]) -> BuiltinResult {
    args.iter().copied().reduce(f64::min).ok_or(MathFault::Domain)
}

/// Largest of the arguments.
pub fn max(args: &[f64]) -> BuiltinResult {
    args.iter().copied().reduce(f64::max).ok_or(MathFault::Domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow_rejects_zero_to_negative() {
        assert_eq!(pow(&[0.0, -1.0]), Err(MathFault::DivisionByZero));
        assert_eq!(pow(&[0.0, 0.0]), Ok(1.0));
    }

    #[test]
    fn pow_rejects_complex_results() {
        assert_eq!(pow(&[-8.0, 1.0 / 3.0]), Err(MathFault::Domain));
        assert_eq!(pow(&[-2.0, 3.0]), Ok(-8.0));
    }

    #[test]
    fn log_base_one_divides_by_zero() {
        assert_eq!(log(&[10.0, 1.0]), Err(MathFault::DivisionByZero));
        assert_eq!(log(&[10.0, -2.0]), Err(MathFault::Domain));
    }

    #[test]
    fn wrong_argument_counts_are_refused() {
        let builtins: [fn(&[f64]) -> BuiltinResult; 10] =
            [sqrt, sin, cos, tan, exp, abs, log, pow, min, max];
        for f in builtins {
            assert_eq!(f(&[]), Err(MathFault::Domain));
        }
        assert_eq!(sqrt(&[4.0, 9.0]), Err(MathFault::Domain));
        assert_eq!(pow(&[2.0]), Err(MathFault::Domain));
        assert_eq!(log(&[8.0, 2.0, 1.0]), Err(MathFault::Domain));
    }

    #[test]
    fn min_max_are_variadic() {
        assert_eq!(min(&[3.0, -1.0, 2.0]), Ok(-1.0));
        assert_eq!(max(&[3.0, -1.0, 7.5, 2.0]), Ok(7.5));
    }
}
