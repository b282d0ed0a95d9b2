use crate::{
    ast::Expr,
    error::EvalError,
    interpreter::{
        evaluator::{
            binary::fault_to_error,
            core::{EvalResult, Evaluator, check_finite, forbidden},
        },
        namespace::{Binding, Builtin},
    },
};

impl Evaluator<'_> {
    /// Evaluates a function call.
    ///
    /// The callee must resolve to a builtin, either as a global name
    /// (`sqrt(2)`) or as a member of a module surrogate (`math.sqrt(2)`).
    /// Arity is checked first, then every argument is evaluated left to right,
    /// then the builtin runs.
    ///
    /// # Parameters
    /// - `callee`: The called expression, an identifier or attribute.
    /// - `arguments`: Argument expressions.
    /// - `offset`: Byte offset for error reporting.
    ///
    /// # Returns
    /// The function result or an error if lookup, arity, an argument or the
    /// function itself fails.
    pub(crate) fn eval_call(&self,
                            callee: &Expr,
                            arguments: &[Expr],
                            offset: usize)
                            -> EvalResult<f64> {
        let builtin = self.resolve_callee(callee, offset)?;
        let name = callee.callee_name();

        if !builtin.arity.check(arguments.len()) {
            return Err(EvalError::Arity { name,
                                          expected: builtin.arity.describe(),
                                          found: arguments.len(),
                                          offset });
        }

        let arg_vals = arguments.iter()
                                .map(|arg| self.eval(arg))
                                .collect::<EvalResult<Vec<_>>>()?;

        let result = (builtin.func)(&arg_vals).map_err(|fault| fault_to_error(fault, &name, offset))?;

        check_finite(result, &name, offset)
    }

    /// Finds the builtin a callee refers to.
    ///
    /// Calling a constant or a module surrogate is forbidden; calling a name
    /// outside the namespace is unknown.
    fn resolve_callee(&self, callee: &Expr, offset: usize) -> EvalResult<&'static Builtin> {
        let binding = match callee {
            Expr::Identifier { name, .. } => match self.namespace().global(name) {
                Some(binding) => binding,
                None if self.namespace().is_module(name) => return Err(forbidden(name, offset)),
                None => {
                    return Err(EvalError::UnknownName { name: name.clone(),
                                                        offset });
                },
            },
            Expr::Attribute { base, name, .. } => self.resolve_attribute(base, name, offset)?,
            other => return Err(forbidden(other.callee_name(), offset)),
        };

        match binding {
            Binding::Function(builtin) => Ok(builtin),
            Binding::Constant(_) => Err(forbidden(callee.callee_name(), offset)),
        }
    }
}
