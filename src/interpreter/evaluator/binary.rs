use crate::{
    ast::BinaryOperator,
    error::EvalError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Evaluator, check_finite},
            function::builtin,
        },
        namespace::MathFault,
    },
};

impl Evaluator<'_> {
    /// Evaluates a binary arithmetic operation on two finite operands.
    ///
    /// Division by zero is checked explicitly instead of producing an
    /// infinity. Power shares its rules with the `pow` builtin: a zero base
    /// with a negative exponent divides by zero, a result outside the reals is
    /// a domain error. An overflowing result is reported as not finite.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `offset`: Byte offset of the operator for error reporting.
    ///
    /// # Example
    /// ```
    /// use scenegen::{ast::BinaryOperator, error::EvalError, interpreter::evaluator::Evaluator};
    ///
    /// let result = Evaluator::eval_binary(BinaryOperator::Mul, 1.5, 2.0, 0).unwrap();
    /// assert_eq!(result, 3.0);
    ///
    /// let err = Evaluator::eval_binary(BinaryOperator::Div, 1.0, 0.0, 1).unwrap_err();
    /// assert!(matches!(err, EvalError::DivisionByZero { .. }));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: f64,
                       right: f64,
                       offset: usize)
                       -> EvalResult<f64> {
        use BinaryOperator::{Add, Div, Mul, Pow, Sub};

        let result = match op {
            Add => left + right,
            Sub => left - right,
            Mul => left * right,
            Div => {
                if right == 0.0 {
                    return Err(EvalError::DivisionByZero { operation: op.to_string(),
                                                           offset });
                }
                left / right
            },
            Pow => builtin::pow(&[left, right]).map_err(|fault| {
                                                   fault_to_error(fault, &op.to_string(), offset)
                                               })?,
        };

        check_finite(result, &op.to_string(), offset)
    }
}

/// Converts a builtin's refusal into an evaluation error naming `operation`.
pub(crate) fn fault_to_error(fault: MathFault, operation: &str, offset: usize) -> EvalError {
    match fault {
        MathFault::Domain => EvalError::Domain { operation: operation.to_string(),
                                                 offset },
        MathFault::DivisionByZero => {
            EvalError::DivisionByZero { operation: operation.to_string(),
                                        offset }
        },
    }
}
