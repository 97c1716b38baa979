use thiserror::Error;

/// Returned when an operation is not allowed in the current phase.
///
/// User mistakes such as a blank answer are not errors; they are kept as
/// validation state on the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot {operation} while the quiz is {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: &'static str,
    },

    #[error("submit is only possible on the last step (on step {current} of {total})")]
    NotLastStep { current: usize, total: usize },
}
