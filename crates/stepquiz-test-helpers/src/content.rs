use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use stepquiz_core::source::{ContentSource, SourceError};
use stepquiz_model::quiz::content::QuizContent;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct FakeError(pub String);

/// Always returns the same content.
#[derive(Debug, Clone)]
pub struct StaticContentSource {
    content: QuizContent,
}

impl StaticContentSource {
    #[must_use]
    pub fn new(content: QuizContent) -> Self {
        Self { content }
    }
}

#[async_trait]
impl ContentSource for StaticContentSource {
    async fn fetch(&self) -> Result<QuizContent, SourceError> {
        Ok(self.content.clone())
    }
}

/// Fails a fixed number of times, then serves the content.
#[derive(Debug)]
pub struct FlakyContentSource {
    failures: AtomicUsize,
    content: QuizContent,
    calls: AtomicUsize,
}

impl FlakyContentSource {
    #[must_use]
    pub fn new(failures: usize, content: QuizContent) -> Self {
        Self {
            failures: AtomicUsize::new(failures),
            content,
            calls: AtomicUsize::new(0),
        }
    }

    /// Never succeeds.
    #[must_use]
    pub fn failing() -> Self {
        Self::new(usize::MAX, QuizContent::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentSource for FlakyContentSource {
    async fn fetch(&self) -> Result<QuizContent, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(SourceError::fetch(FakeError("cms unreachable".to_owned())));
        }
        Ok(self.content.clone())
    }
}

/// Serves queued responses in order; panics when it runs dry.
#[derive(Debug, Default)]
pub struct ScriptedContentSource {
    responses: Mutex<Vec<Result<QuizContent, String>>>,
}

impl ScriptedContentSource {
    #[must_use]
    pub fn new(mut responses: Vec<Result<QuizContent, String>>) -> Self {
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
        }
    }
}

#[async_trait]
impl ContentSource for ScriptedContentSource {
    async fn fetch(&self) -> Result<QuizContent, SourceError> {
        let next = self.responses.lock().unwrap().pop().expect("no scripted response left");
        next.map_err(SourceError::Invalid)
    }
}
