use async_trait::async_trait;
use stepquiz_model::quiz::submission::SubmissionRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to store submission: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("submission rejected: {0}")]
    Rejected(String),
}

impl SinkError {
    pub fn store(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Store(Box::new(error))
    }
}

/// Destination for submitted results.
///
/// Writes are fire-and-forget from the quiz's point of view; a failing sink
/// never changes what the user sees.
#[async_trait]
pub trait ResultsSink: Send + Sync {
    async fn store(&self, record: &SubmissionRecord) -> Result<(), SinkError>;
}

/// Sink used when no search index is configured. Records are only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSink;

#[async_trait]
impl ResultsSink for LoggingSink {
    async fn store(&self, record: &SubmissionRecord) -> Result<(), SinkError> {
        tracing::info!(
            object_id = %record.object_id,
            correct = record.correct_count,
            total = record.total_questions,
            "no results sink configured, submission not persisted"
        );
        Ok(())
    }
}
