//! Unified error type for the preventive-maintenance optimizer core.
//!
//! Split between recoverable domain errors and the small set of conditions
//! that indicate a bug rather than bad input.

use thiserror::Error;

/// Errors raised by the plan-evaluation pipeline.
///
/// `InfeasibleGroup` and `NonConvergence` are caught internally by the
/// search loop (candidate filtering, Newton fallback) and never surface to a
/// caller in normal operation; `InvariantViolation` is fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PmError {
    /// A group's activity windows have no common intersection.
    #[error("infeasible group: activity windows do not intersect")]
    InfeasibleGroup,

    /// A core invariant was violated after truncation or mutation.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// Newton iteration failed to converge within the allotted iteration cap.
    #[error("Newton iteration did not converge within {iterations} iterations")]
    NonConvergence { iterations: usize },
}

/// Convenience alias for results produced by the optimizer core.
pub type PmResult<T> = Result<T, PmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_descriptive() {
        let err = PmError::InvariantViolation("population size mismatch".into());
        assert!(err.to_string().contains("population size mismatch"));
    }

    #[test]
    fn non_convergence_carries_iteration_count() {
        let err = PmError::NonConvergence { iterations: 100 };
        assert!(err.to_string().contains("100"));
    }
}
