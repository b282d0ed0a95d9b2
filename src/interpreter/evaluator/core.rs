use crate::{
    ast::Expr,
    error::{EvalError, ExpressionError},
    interpreter::{
        namespace::{Binding, Namespace},
        parser::parse,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Walks expression trees against a fixed namespace.
///
/// The evaluator holds nothing but a shared reference to its namespace:
/// evaluation is a pure function of the tree and the namespace, so the same
/// text always produces the same bits and one evaluator can be used from
/// several threads at once.
///
/// ## Usage
///
/// ```
/// use scenegen::interpreter::{evaluator::Evaluator, parser::parse};
///
/// let evaluator = Evaluator::standard();
/// let value = evaluator.evaluate(&parse("2 * math.pi * 0.5").unwrap()).unwrap();
/// assert!((value - std::f64::consts::PI).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'ns> {
    namespace: &'ns Namespace,
}

impl<'ns> Evaluator<'ns> {
    /// Creates an evaluator over `namespace`.
    #[must_use]
    pub const fn new(namespace: &'ns Namespace) -> Self {
        Self { namespace }
    }

    /// The namespace this evaluator resolves names against.
    #[must_use]
    pub const fn namespace(&self) -> &'ns Namespace {
        self.namespace
    }

    /// Evaluates an expression tree to a finite number.
    ///
    /// # Errors
    /// Any [`EvalError`]; see the variants for the exact conditions.
    pub fn evaluate(&self, expr: &Expr) -> EvalResult<f64> {
        let value = self.eval(expr)?;
        check_finite(value, "expression", expr.offset())
    }

    /// Parses and evaluates `source` in one call.
    ///
    /// # Errors
    /// [`ExpressionError::Parse`] for malformed text,
    /// [`ExpressionError::Eval`] for evaluation failures.
    pub fn evaluate_text(&self, source: &str) -> Result<f64, ExpressionError> {
        let expr = parse(source)?;
        let value = self.evaluate(&expr)?;
        tracing::trace!(source, value, "evaluated expression");
        Ok(value)
    }

    /// Evaluates an expression node.
    ///
    /// This is the recursive dispatch. It dispatches on the expression
    /// variant: literals, names, unary and binary operations, calls and
    /// member access.
    pub(crate) fn eval(&self, expr: &Expr) -> EvalResult<f64> {
        match expr {
            Expr::Number { value, .. } => Ok(*value),
            Expr::Identifier { name, offset } => self.eval_identifier(name, *offset),
            Expr::UnaryOp { op, expr, .. } => {
                let value = self.eval(expr)?;
                Ok(Self::eval_unary(*op, value))
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             offset, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, left, right, *offset)
            },
            Expr::Call { callee,
                         arguments,
                         offset, } => self.eval_call(callee, arguments, *offset),
            Expr::Attribute { base, name, offset } => {
                match self.resolve_attribute(base, name, *offset)? {
                    Binding::Constant(value) => Ok(value),
                    Binding::Function(_) => Err(forbidden(format!("{base}.{name}"), *offset)),
                }
            },
        }
    }

    /// Resolves a bare name used as a value.
    ///
    /// Only constants are values. Functions and module surrogates used as
    /// values are forbidden; names outside the namespace are unknown.
    fn eval_identifier(&self, name: &str, offset: usize) -> EvalResult<f64> {
        match self.namespace.global(name) {
            Some(Binding::Constant(value)) => Ok(value),
            Some(Binding::Function(_)) => Err(forbidden(name, offset)),
            None if self.namespace.is_module(name) => Err(forbidden(name, offset)),
            None => Err(EvalError::UnknownName { name: name.to_string(),
                                                 offset }),
        }
    }

    /// Resolves `base.name`.
    ///
    /// Member access is only allowed on a module surrogate, and only for one
    /// of its exposed members. Everything else (`os.system`, `pi.real`,
    /// `math.__dict__`) is forbidden rather than unknown.
    pub(crate) fn resolve_attribute(&self,
                                    base: &str,
                                    name: &str,
                                    offset: usize)
                                    -> EvalResult<Binding> {
        self.namespace
            .member(base, name)
            .ok_or_else(|| forbidden(format!("{base}.{name}"), offset))
    }
}

impl Evaluator<'static> {
    /// Evaluator over the process-wide standard namespace.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Namespace::standard())
    }
}

/// Rejects NaN and infinite results.
///
/// NaN means the operation left the real domain; infinity means it
/// overflowed.
pub(crate) fn check_finite(value: f64, name: &str, offset: usize) -> EvalResult<f64> {
    if value.is_nan() {
        return Err(EvalError::Domain { operation: name.to_string(),
                                       offset });
    }
    if value.is_infinite() {
        return Err(EvalError::InvalidNumber { name: name.to_string(),
                                              offset });
    }
    Ok(value)
}

pub(crate) fn forbidden(target: impl Into<String>, offset: usize) -> EvalError {
    EvalError::ForbiddenAccess { target: target.into(),
                                 offset }
}
