use crate::quiz::error::LoadingError;
use crate::quiz::v01::quiz::QuizV01;
use schemars::JsonSchema;
use schemars::schema::RootSchema;
use serde::Deserialize;
use std::path::Path;
use stepquiz_model::quiz::content::QuizContent;
use stepquiz_model::quiz::question::Question;
use stepquiz_model::quiz::step::Step;

pub mod error;
pub mod validation;
pub mod v01;

pub use validation::{has_errors, validate};

#[derive(Deserialize, Debug, JsonSchema)]
#[serde(tag = "version")]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub enum VersionConfig {
    #[serde(rename = "0.1")]
    V01 { quiz: QuizV01 },
}

impl From<VersionConfig> for QuizContent {
    fn from(config: VersionConfig) -> Self {
        let VersionConfig::V01 { quiz } = config;
        QuizContent::new(
            quiz.steps.into_iter().map(Step::from).collect(),
            quiz.questions.into_values().map(Question::from),
        )
    }
}

pub fn parse(yaml: &str) -> Result<QuizContent, LoadingError> {
    let config = serde_yml::from_str::<VersionConfig>(yaml)?;
    Ok(config.into())
}

pub async fn load_from_path(path: impl AsRef<Path>) -> Result<QuizContent, LoadingError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading quiz file");
    let yaml = tokio::fs::read_to_string(path).await.map_err(|source| LoadingError::Io {
        path: path.to_owned(),
        source,
    })?;
    let content = parse(&yaml)?;
    tracing::debug!(steps = content.steps.len(), questions = content.questions.len(), "loaded quiz file");
    Ok(content)
}

/// JSON schema of the quiz file format, for editor integration.
#[must_use]
pub fn json_schema() -> RootSchema {
    schemars::schema_for!(VersionConfig)
}
