use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::interpreter::evaluator::function::builtin;

/// Why a builtin refused its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathFault {
    /// The argument lies outside the real domain of the function.
    Domain,
    /// The function would divide by zero.
    DivisionByZero,
}

/// Signature shared by every builtin function.
///
/// A builtin receives its already evaluated arguments. Arity is checked by
/// the evaluator before the call, so implementations may index `args`
/// directly.
pub type NativeFn = fn(&[f64]) -> Result<f64, MathFault>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
/// - `AtLeast(n)` means the builtin is variadic with a lower bound.
#[derive(Debug, Clone, Copy)]
pub enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    #[must_use]
    pub fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
            Self::AtLeast(m) => n >= *m,
        }
    }

    /// Renders the constraint for error messages (`"1"`, `"1 or 2"`,
    /// `"at least 2"`).
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Exact(m) => m.to_string(),
            Self::OneOf(arr) => {
                arr.iter()
                   .map(ToString::to_string)
                   .collect::<Vec<_>>()
                   .join(" or ")
            },
            Self::AtLeast(m) => format!("at least {m}"),
        }
    }
}

/// A pure numeric function exposed to expressions.
#[derive(Debug)]
pub struct Builtin {
    pub name:  &'static str,
    pub arity: Arity,
    pub func:  NativeFn,
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[Builtin] = &[
            $(
                Builtin { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of every builtin function, in table order.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "sqrt" => { arity: Arity::Exact(1), func: builtin::sqrt },
    "sin"  => { arity: Arity::Exact(1), func: builtin::sin },
    "cos"  => { arity: Arity::Exact(1), func: builtin::cos },
    "tan"  => { arity: Arity::Exact(1), func: builtin::tan },
    "log"  => { arity: Arity::OneOf(&[1, 2]), func: builtin::log },
    "exp"  => { arity: Arity::Exact(1), func: builtin::exp },
    "abs"  => { arity: Arity::Exact(1), func: builtin::abs },
    "pow"  => { arity: Arity::Exact(2), func: builtin::pow },
    "min"  => { arity: Arity::AtLeast(2), func: builtin::min },
    "max"  => { arity: Arity::AtLeast(2), func: builtin::max },
}

/// Numeric constants, shared by the global scope and every module surrogate.
pub const BUILTIN_CONSTANTS: &[(&str, f64)] = &[("pi", std::f64::consts::PI),
                                                ("e", std::f64::consts::E)];

/// Names that resolve to module surrogates (`math.pi`, `np.sqrt(2)`).
pub const MODULE_SURROGATES: &[&str] = &["math", "np"];

/// What a name or `module.member` path resolves to.
#[derive(Debug, Clone, Copy)]
pub enum Binding {
    /// A numeric constant.
    Constant(f64),
    /// A callable builtin.
    Function(&'static Builtin),
}

/// The fixed set of names visible to evaluation.
///
/// A namespace is built once and then only read. Evaluation takes it by
/// shared reference and there is no method that mutates a namespace after
/// construction, so one instance can be shared freely between threads.
///
/// The standard namespace holds `pi`, `e`, the builtin functions and the
/// module surrogates `math` and `np`, each exposing exactly the same
/// constants and functions.
#[derive(Debug, Clone)]
pub struct Namespace {
    globals: HashMap<String, Binding>,
    modules: HashMap<String, HashMap<String, Binding>>,
}

static STANDARD: Lazy<Namespace> = Lazy::new(Namespace::new_standard);

impl Namespace {
    /// Returns the process-wide standard namespace.
    ///
    /// # Example
    /// ```
    /// use scenegen::interpreter::namespace::{Binding, Namespace};
    ///
    /// let ns = Namespace::standard();
    /// assert!(matches!(ns.global("pi"), Some(Binding::Constant(_))));
    /// assert!(matches!(ns.member("math", "sqrt"), Some(Binding::Function(_))));
    /// assert!(ns.member("os", "system").is_none());
    /// ```
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Builds a fresh copy of the standard namespace.
    ///
    /// Use together with [`Namespace::with_constant`] to expose extra
    /// caller-defined constants.
    #[must_use]
    pub fn new_standard() -> Self {
        let members = standard_members();
        let modules = MODULE_SURROGATES.iter()
                                       .map(|name| ((*name).to_string(), members.clone()))
                                       .collect();

        Self { globals: members,
               modules }
    }

    /// Returns this namespace extended with one more global constant.
    ///
    /// Consumes `self`: the namespace is assembled by value and frozen once
    /// it is shared.
    #[must_use]
    pub fn with_constant(mut self, name: impl Into<String>, value: f64) -> Self {
        self.globals.insert(name.into(), Binding::Constant(value));
        self
    }

    /// Looks up a global name.
    #[must_use]
    pub fn global(&self, name: &str) -> Option<Binding> {
        self.globals.get(name).copied()
    }

    /// Returns `true` if `name` is a module surrogate.
    #[must_use]
    pub fn is_module(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Looks up `member` on the module surrogate `module`.
    ///
    /// Returns `None` if `module` is not a module surrogate or does not expose
    /// `member`.
    #[must_use]
    pub fn member(&self, module: &str, member: &str) -> Option<Binding> {
        self.modules.get(module)?.get(member).copied()
    }
}

/// Constants and functions exposed both globally and by each module.
fn standard_members() -> HashMap<String, Binding> {
    let constants = BUILTIN_CONSTANTS.iter()
                                     .map(|(name, value)| ((*name).to_string(), Binding::Constant(*value)));
    let functions = BUILTIN_TABLE.iter()
                                 .map(|builtin| (builtin.name.to_string(), Binding::Function(builtin)));

    constants.chain(functions).collect()
}
