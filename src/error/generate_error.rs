use thiserror::Error;

/// Represents all errors that can occur while generating placements.
///
/// A failed generation never returns a partial sequence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    /// The spec violates a precondition of its generator kind.
    #[error("invalid generator spec: {reason}")]
    InvalidSpec {
        /// Which field is wrong and why.
        reason: String,
    },
    /// The packing post-pass could not place a particle.
    #[error("packing exhausted: particle {index} (size {size}) could not be placed after {attempts} attempts")]
    PackingExhausted {
        /// Position of the particle in the size sequence.
        index:    usize,
        /// Size of the particle that did not fit.
        size:     f64,
        /// Number of candidate positions tried.
        attempts: usize,
    },
}

impl GenerateError {
    /// Shorthand for [`GenerateError::InvalidSpec`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidSpec { reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failing_field() {
        let e = GenerateError::invalid("count must be > 0");
        let msg = e.to_string();
        assert!(msg.contains("invalid generator spec"));
        assert!(msg.contains("count"));
    }

    #[test]
    fn packing_display_reports_attempts() {
        let e = GenerateError::PackingExhausted { index:    3,
                                                  size:     0.5,
                                                  attempts: 100, };
        assert!(e.to_string().contains("after 100 attempts"));
    }
}
