use crate::{ast::UnaryOperator, interpreter::evaluator::core::Evaluator};

impl Evaluator<'_> {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation.
    /// - `Plus`: identity.
    ///
    /// Neither can fail on a finite operand.
    ///
    /// # Example
    /// ```
    /// use scenegen::{ast::UnaryOperator, interpreter::evaluator::Evaluator};
    ///
    /// assert_eq!(Evaluator::eval_unary(UnaryOperator::Negate, 5.0), -5.0);
    /// assert_eq!(Evaluator::eval_unary(UnaryOperator::Plus, 5.0), 5.0);
    /// ```
    #[must_use]
    pub fn eval_unary(op: UnaryOperator, value: f64) -> f64 {
        match op {
            UnaryOperator::Negate => -value,
            UnaryOperator::Plus => value,
        }
    }
}
