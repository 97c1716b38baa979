use async_trait::async_trait;
use stepquiz_model::quiz::content::QuizContent;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to fetch quiz content: {0}")]
    Fetch(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("invalid quiz content: {0}")]
    Invalid(String),
}

impl SourceError {
    pub fn fetch(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Fetch(Box::new(error))
    }
}

/// Where steps and questions come from.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self) -> Result<QuizContent, SourceError>;
}
