use std::fmt;

/// An abstract syntax tree (AST) node representing an arithmetic expression.
///
/// The tree is restricted to the safe sub-grammar: numeric literals, names,
/// unary and binary arithmetic, one level of member access on a name and one
/// level of call on a name or member. Every node carries the byte offset of
/// the token that introduced it, so evaluation errors can point back into the
/// source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal such as `2.1e11`.
    Number {
        /// The literal value.
        value:  f64,
        /// Byte offset in the source text.
        offset: usize,
    },
    /// Reference to a namespace entry by name.
    Identifier {
        /// Name being referenced.
        name:   String,
        /// Byte offset in the source text.
        offset: usize,
    },
    /// A unary operation (e.g. negation).
    UnaryOp {
        /// The unary operator to apply.
        op:     UnaryOperator,
        /// The operand expression.
        expr:   Box<Self>,
        /// Byte offset in the source text.
        offset: usize,
    },
    /// A binary operation (addition, power, etc.).
    BinaryOp {
        /// Left operand.
        left:   Box<Self>,
        /// The operator.
        op:     BinaryOperator,
        /// Right operand.
        right:  Box<Self>,
        /// Byte offset of the operator token.
        offset: usize,
    },
    /// Function call expression (e.g. `sqrt(x)` or `math.sqrt(x)`).
    ///
    /// The callee is always an [`Expr::Identifier`] or an
    /// [`Expr::Attribute`]; the parser never produces anything else here.
    Call {
        /// The function being called.
        callee:    Box<Self>,
        /// Arguments, evaluated left to right.
        arguments: Vec<Self>,
        /// Byte offset in the source text.
        offset:    usize,
    },
    /// Member access on a module surrogate (e.g. `math.pi`).
    Attribute {
        /// Name of the module-like namespace entry.
        base:   String,
        /// Member name.
        name:   String,
        /// Byte offset in the source text.
        offset: usize,
    },
}

impl Expr {
    /// Returns the byte offset associated with this node.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Number { offset, .. }
            | Self::Identifier { offset, .. }
            | Self::UnaryOp { offset, .. }
            | Self::BinaryOp { offset, .. }
            | Self::Call { offset, .. }
            | Self::Attribute { offset, .. } => *offset,
        }
    }

    /// Human readable name of a callee, used in error messages.
    ///
    /// Returns `name` for identifiers, `base.name` for attributes and a
    /// placeholder for anything else.
    #[must_use]
    pub fn callee_name(&self) -> String {
        match self {
            Self::Identifier { name, .. } => name.clone(),
            Self::Attribute { base, name, .. } => format!("{base}.{name}"),
            _ => "<expression>".to_string(),
        }
    }
}

/// One `name = expression` entry of a parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name.
    pub name:   String,
    /// Right-hand side expression.
    pub value:  Expr,
    /// Byte offset of the parameter name.
    pub offset: usize,
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^` or `**`
    Pow,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        };
        write!(f, "{symbol}")
    }
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `-x`
    Negate,
    /// `+x`
    Plus,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Plus => write!(f, "+"),
        }
    }
}
