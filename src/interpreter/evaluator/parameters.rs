use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    error::{EvalError, ExpressionError},
    interpreter::{evaluator::core::Evaluator, parser::parse_parameter_list},
};

/// An evaluated parameter list: parameter name → finite number.
///
/// Names are unique. Insertion order follows the source text, which keeps
/// diagnostics and echoes readable; lookups do not depend on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Parameters {
    values: IndexMap<String, f64>,
}

impl Parameters {
    /// Value of `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Returns `true` if `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the list was blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parameter names in source order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// `(name, value)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl Evaluator<'_> {
    /// Parses and evaluates a `name = expression, ...` list.
    ///
    /// Every right-hand side is evaluated independently against the
    /// namespace; a parameter cannot refer to another parameter. Each value
    /// must be a finite real number.
    ///
    /// # Errors
    /// - [`ExpressionError::Parse`] for malformed text or duplicate names.
    /// - [`ExpressionError::Eval`] for any evaluation failure, including
    ///   [`EvalError::InvalidNumber`] naming the parameter whose value is not
    ///   finite.
    ///
    /// # Example
    /// ```
    /// use scenegen::interpreter::evaluator::Evaluator;
    ///
    /// let params = Evaluator::standard().evaluate_parameter_list("young=2.1e11, nu=0.3")
    ///                                   .unwrap();
    /// assert_eq!(params.names().collect::<Vec<_>>(), ["young", "nu"]);
    /// assert_eq!(params.get("nu"), Some(0.3));
    /// ```
    pub fn evaluate_parameter_list(&self, source: &str) -> Result<Parameters, ExpressionError> {
        let parameters = parse_parameter_list(source)?;
        let mut values = IndexMap::with_capacity(parameters.len());

        for parameter in parameters {
            let value = self.eval(&parameter.value)?;
            if !value.is_finite() {
                return Err(EvalError::InvalidNumber { name:   parameter.name,
                                                      offset: parameter.offset, }.into());
            }
            values.insert(parameter.name, value);
        }

        tracing::debug!(parameters = values.len(), "evaluated parameter list");
        Ok(Parameters { values })
    }
}
