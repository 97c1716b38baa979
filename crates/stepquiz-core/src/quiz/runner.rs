use crate::quiz::error::TransitionError;
use crate::quiz::session::{Phase, QuizSession};
use crate::sink::ResultsSink;
use crate::source::ContentSource;
use std::error::Error;
use std::sync::Arc;
use stepquiz_model::quiz::submission::SubmissionRecord;
use tokio::task::JoinHandle;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Ready { steps: usize },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Stored(Uuid),
    Failed(String),
}

/// Handle to a sink write running in the background.
///
/// Dropping it does not cancel the write.
#[derive(Debug)]
pub struct PendingPersist {
    object_id: Uuid,
    handle: JoinHandle<PersistOutcome>,
}

impl PendingPersist {
    #[must_use]
    pub fn object_id(&self) -> Uuid {
        self.object_id
    }

    pub async fn outcome(self) -> PersistOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = &err as &dyn Error, object_id = %self.object_id, "persist task failed");
                PersistOutcome::Failed(err.to_string())
            }
        }
    }
}

/// Writes one record to the sink. Failures are logged and returned, never raised.
pub async fn persist(sink: &dyn ResultsSink, record: SubmissionRecord) -> PersistOutcome {
    match sink.store(&record).await {
        Ok(()) => {
            tracing::info!(object_id = %record.object_id, "submission stored");
            PersistOutcome::Stored(record.object_id)
        }
        Err(err) => {
            tracing::error!(error = &err as &dyn Error, object_id = %record.object_id, "failed to store submission");
            PersistOutcome::Failed(err.to_string())
        }
    }
}

/// Drives a [`QuizSession`] against a content source and a results sink.
pub struct QuizRunner<C> {
    source: C,
    sink: Arc<dyn ResultsSink>,
    session: QuizSession,
}

impl<C: ContentSource> QuizRunner<C> {
    pub fn new(source: C, sink: Arc<dyn ResultsSink>) -> Self {
        Self {
            source,
            sink,
            session: QuizSession::new(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &C {
        &self.source
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut QuizSession {
        &mut self.session
    }

    /// Fetches content once. There is no automatic retry; see [`Self::retry_load`].
    ///
    /// Outside of `Loading` this fails without touching the source.
    pub async fn load(&mut self) -> Result<LoadOutcome, TransitionError> {
        self.session.ensure_phase(&Phase::Loading, "load content")?;
        match self.source.fetch().await {
            Ok(content) => self.session.load(content)?,
            Err(err) => {
                tracing::error!(error = &err as &dyn Error, "failed to load quiz content");
                self.session.fail(err.to_string())?;
            }
        }

        Ok(match self.session.phase() {
            Phase::LoadFailed { reason } => LoadOutcome::Failed(reason.clone()),
            _ => LoadOutcome::Ready {
                steps: self.session.steps().len(),
            },
        })
    }

    pub async fn retry_load(&mut self) -> Result<LoadOutcome, TransitionError> {
        self.session.retry()?;
        self.load().await
    }

    /// Submits the session and starts persisting the result in the background.
    ///
    /// The session is `Submitted` as soon as this returns `Ok(Some(_))`,
    /// whatever the sink does later. Must be called within a tokio runtime.
    pub fn submit(&mut self) -> Result<Option<PendingPersist>, TransitionError> {
        let Some(submission) = self.session.submit()? else {
            return Ok(None);
        };

        let record = SubmissionRecord::new(&submission);
        let object_id = record.object_id;
        let sink = Arc::clone(&self.sink);
        let handle = tokio::spawn(async move { persist(sink.as_ref(), record).await });

        Ok(Some(PendingPersist { object_id, handle }))
    }
}
