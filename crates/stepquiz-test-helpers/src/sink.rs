use crate::content::FakeError;
use async_trait::async_trait;
use std::sync::Mutex;
use stepquiz_core::sink::{ResultsSink, SinkError};
use stepquiz_model::quiz::submission::SubmissionRecord;

/// Keeps every stored record in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<SubmissionRecord>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<SubmissionRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResultsSink for RecordingSink {
    async fn store(&self, record: &SubmissionRecord) -> Result<(), SinkError> {
        tracing::debug!(object_id = %record.object_id, "recording submission");
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Rejects every write.
#[derive(Debug, Clone, Default)]
pub struct FailingSink;

#[async_trait]
impl ResultsSink for FailingSink {
    async fn store(&self, _record: &SubmissionRecord) -> Result<(), SinkError> {
        Err(SinkError::store(FakeError("index unavailable".to_owned())))
    }
}
