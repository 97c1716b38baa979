use async_trait::async_trait;
use std::path::PathBuf;
use stepquiz_config::quiz::error::{LoadingError, Severity};
use stepquiz_config::quiz::{load_from_path, validate};
use stepquiz_core::source::{ContentSource, SourceError};
use stepquiz_model::quiz::content::QuizContent;

/// Reads a versioned YAML quiz file on every fetch.
#[derive(Debug, Clone)]
pub struct FileContentSource {
    path: PathBuf,
}

impl FileContentSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ContentSource for FileContentSource {
    async fn fetch(&self) -> Result<QuizContent, SourceError> {
        let content = load_from_path(&self.path).await.map_err(|err| match err {
            LoadingError::ParseError(err) => SourceError::Invalid(err.to_string()),
            err => SourceError::fetch(err),
        })?;

        for finding in validate(&content) {
            match finding.severity() {
                Severity::Error => tracing::error!(path = %self.path.display(), %finding, "quiz file has errors"),
                Severity::Warning => tracing::warn!(path = %self.path.display(), %finding, "quiz file has warnings"),
            }
        }
        Ok(content)
    }
}
