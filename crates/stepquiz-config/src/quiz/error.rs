use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadingError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    ParseError(#[from] serde_yml::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A problem found in otherwise well-formed quiz content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFinding {
    #[error("step `{step}` references unknown question `{question}`")]
    UnknownQuestion { step: String, question: String },

    #[error("step id `{0}` is used more than once")]
    DuplicateStep(String),

    #[error("multiple choice question `{0}` has no choices")]
    NoChoices(String),

    #[error("question `{0}` has no correct answer and is never scored")]
    NoCorrectAnswer(String),

    #[error("correct answer `{answer}` of question `{question}` does not select one of its {choices} choices")]
    AnswerOutOfRange {
        question: String,
        answer: String,
        choices: usize,
    },
}

impl ValidationFinding {
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::UnknownQuestion { .. } | Self::DuplicateStep(_) => Severity::Error,
            Self::NoChoices(_) | Self::NoCorrectAnswer(_) | Self::AnswerOutOfRange { .. } => Severity::Warning,
        }
    }
}
