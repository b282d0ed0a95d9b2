use thiserror::Error;

/// Represents all errors that can occur during lexing or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text is not part of the expression grammar.
    #[error("Error at offset {offset}: {message}.")]
    Syntax {
        /// Byte offset of the offending input.
        offset:  usize,
        /// What was expected or found.
        message: String,
    },
    /// The same name appears twice in one parameter list.
    #[error("Error at offset {offset}: Parameter '{name}' is defined more than once.")]
    DuplicateParameter {
        /// The repeated parameter name.
        name:   String,
        /// Byte offset of the second definition.
        offset: usize,
    },
}

impl ParseError {
    /// Shorthand for [`ParseError::Syntax`].
    pub fn syntax(offset: usize, message: impl Into<String>) -> Self {
        Self::Syntax { offset,
                       message: message.into() }
    }

    /// Byte offset the error points at.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Syntax { offset, .. } | Self::DuplicateParameter { offset, .. } => *offset,
        }
    }
}
