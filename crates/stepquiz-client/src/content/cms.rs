//! Content source backed by a headless CMS delivery API.
//!
//! Steps are `step` entries ordered by `stepOrder`; the questions they link are
//! delivered in the `includes.Entry` block of the same response.

use crate::client::base::{BaseClient, Config, build_request};
use crate::error::{Error, InternalError};
use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue, Method};
use serde::Deserialize;
use stepquiz_core::source::{ContentSource, SourceError};
use stepquiz_http::{BaseHttpClient, HttpClient};
use stepquiz_model::quiz::content::QuizContent;
use stepquiz_model::quiz::question::{Question, QuestionType};
use stepquiz_model::quiz::step::Step;
use url::Url;

pub const DEFAULT_CMS_URL: &str = "https://cdn.contentful.com/";
pub const DEFAULT_ENVIRONMENT: &str = "master";

/// Sub-ordering offset between questions linked from the same step entry.
const LINKED_QUESTION_OFFSET: f64 = 0.01;

#[derive(Debug, Clone)]
pub struct CmsConfig {
    pub base_url: Url,
    pub space: String,
    pub environment: String,
    pub token: String,
}

#[derive(Deserialize, Debug)]
struct EntryCollection {
    items: Vec<StepEntry>,
    #[serde(default)]
    includes: Option<Includes>,
}

#[derive(Deserialize, Debug)]
struct Includes {
    #[serde(rename = "Entry", default)]
    entry: Vec<QuestionEntry>,
}

#[derive(Deserialize, Debug)]
struct Sys {
    id: String,
}

#[derive(Deserialize, Debug)]
struct Link {
    sys: Sys,
}

#[derive(Deserialize, Debug)]
struct StepEntry {
    fields: StepFields,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct StepFields {
    id: String,
    step_order: f64,
    #[serde(default)]
    questions: Vec<Link>,
}

#[derive(Deserialize, Debug)]
struct QuestionEntry {
    sys: Sys,
    fields: QuestionFields,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct QuestionFields {
    question_text: String,
    question_type: QuestionType,
    #[serde(default)]
    possible_answers: Option<RichText>,
    #[serde(default)]
    correct_answer: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RichText {
    #[serde(default)]
    content: Vec<RichTextNode>,
}

#[derive(Deserialize, Debug)]
struct RichTextNode {
    #[serde(default)]
    content: Vec<RichTextLeaf>,
}

#[derive(Deserialize, Debug)]
struct RichTextLeaf {
    #[serde(default)]
    value: Option<String>,
}

impl RichText {
    /// Text of every leaf of every top-level node, in document order.
    fn into_choices(self) -> Vec<String> {
        self.content
            .into_iter()
            .flat_map(|node| node.content)
            .filter_map(|leaf| leaf.value)
            .collect()
    }
}

impl From<QuestionEntry> for Question {
    fn from(entry: QuestionEntry) -> Self {
        let fields = entry.fields;
        Self {
            id: entry.sys.id,
            prompt: fields.question_text,
            r#type: fields.question_type,
            choices: fields.possible_answers.map(RichText::into_choices).unwrap_or_default(),
            correct_answer: fields.correct_answer,
            explanation: fields.explanation,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn expand_steps(items: Vec<StepEntry>) -> Vec<Step> {
    items
        .into_iter()
        .flat_map(|item| {
            let StepFields { id, step_order, questions } = item.fields;
            questions.into_iter().enumerate().map(move |(index, link)| {
                Step::new(
                    format!("{id}-{index}"),
                    step_order + index as f64 * LINKED_QUESTION_OFFSET,
                    link.sys.id,
                )
            })
        })
        .collect()
}

/// Maps a delivery API response to quiz content.
pub fn parse_entries(body: &str) -> Result<QuizContent, serde_json::Error> {
    let collection: EntryCollection = serde_json::from_str(body)?;
    let questions = collection
        .includes
        .map(|includes| includes.entry)
        .unwrap_or_default()
        .into_iter()
        .map(Question::from);
    Ok(QuizContent::new(expand_steps(collection.items), questions))
}

pub struct CmsContentSource<H = HttpClient> {
    config: Config,
    cms: CmsConfig,
    http_client: H,
}

impl<H: BaseHttpClient<Error = stepquiz_http::Error>> CmsContentSource<H> {
    #[must_use]
    pub fn new(cms: CmsConfig, http_client: H) -> Self {
        Self {
            config: Config::new(cms.base_url.clone()),
            cms,
            http_client,
        }
    }

    fn entries_url(&self) -> Result<Url, InternalError> {
        let mut url = self.config.base_url.for_segments([
            "spaces",
            self.cms.space.as_str(),
            "environments",
            self.cms.environment.as_str(),
            "entries",
        ])?;
        url.query_pairs_mut()
            .append_pair("content_type", "step")
            .append_pair("order", "fields.stepOrder");
        Ok(url)
    }

    fn auth_headers(&self) -> Result<HeaderMap, InternalError> {
        let mut headers = HeaderMap::new();
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.cms.token))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    pub async fn fetch_content(&self) -> Result<QuizContent, Error> {
        let url = self.entries_url()?;
        let request = build_request(Method::GET, &url, self.auth_headers()?, vec![])?;
        let response = self.api_send_request(request).await?;
        let content = parse_entries(response.body())?;
        tracing::info!(
            steps = content.steps.len(),
            questions = content.questions.len(),
            "fetched quiz content"
        );
        Ok(content)
    }
}

impl<H: BaseHttpClient<Error = stepquiz_http::Error>> BaseClient for CmsContentSource<H> {
    type Http = H;

    fn get_http_client(&self) -> &H {
        &self.http_client
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl<H: BaseHttpClient<Error = stepquiz_http::Error>> ContentSource for CmsContentSource<H> {
    async fn fetch(&self) -> Result<QuizContent, SourceError> {
        self.fetch_content().await.map_err(|err| match err {
            Error::Json(err) => SourceError::Invalid(err.to_string()),
            err => SourceError::fetch(err),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rich_text(values: &[&str]) -> serde_json::Value {
        json!({
            "nodeType": "document",
            "content": values.iter().map(|value| json!({
                "nodeType": "paragraph",
                "content": [{"nodeType": "text", "value": value, "marks": []}]
            })).collect::<Vec<_>>()
        })
    }

    #[test]
    fn test_rich_text_choices() {
        let doc = json!({
            "content": [
                {"content": [{"value": "A) Madrid"}, {"value": "B) Rome"}]},
                {"content": [{"nodeType": "hyperlink"}, {"value": "C) Lisbon"}]},
                {"nodeType": "hr"}
            ]
        });
        let rich: RichText = serde_json::from_value(doc).unwrap();
        assert_eq!(rich.into_choices(), ["A) Madrid", "B) Rome", "C) Lisbon"]);
    }

    #[test]
    fn test_parse_entries() {
        let body = json!({
            "items": [
                {"sys": {"id": "e2"}, "fields": {"id": "geo", "stepOrder": 2, "questions": [{"sys": {"id": "q3"}}]}},
                {"sys": {"id": "e1"}, "fields": {"id": "caps", "stepOrder": 1, "questions": [
                    {"sys": {"type": "Link", "linkType": "Entry", "id": "q1"}},
                    {"sys": {"type": "Link", "linkType": "Entry", "id": "q2"}}
                ]}}
            ],
            "includes": {"Entry": [
                {"sys": {"id": "q1"}, "fields": {
                    "questionText": "Capital of Italy?",
                    "questionType": "multiple_choice",
                    "possibleAnswers": rich_text(&["A) Madrid", "B) Rome"]),
                    "correctAnswer": "B",
                    "explanation": "Rome."
                }},
                {"sys": {"id": "q2"}, "fields": {"questionText": "Capital of France?", "questionType": "open_ended", "correctAnswer": "Paris"}},
                {"sys": {"id": "q3"}, "fields": {"questionText": "Why?", "questionType": "open_ended"}}
            ]}
        });
        let content = parse_entries(&body.to_string()).unwrap();

        let steps: Vec<_> = content
            .steps
            .iter()
            .map(|s| (s.id.as_str(), s.order, s.question_id.as_str()))
            .collect();
        assert_eq!(steps, [("geo-0", 2.0, "q3"), ("caps-0", 1.0, "q1"), ("caps-1", 1.01, "q2")]);

        let q1 = content.question("q1").unwrap();
        assert_eq!(q1.r#type, QuestionType::MultipleChoice);
        assert_eq!(q1.choices, ["A) Madrid", "B) Rome"]);
        assert_eq!(q1.explanation.as_deref(), Some("Rome."));
        assert!(content.question("q2").unwrap().choices.is_empty());
        assert_eq!(content.question("q3").unwrap().correct_answer, None);
    }

    #[test]
    fn test_missing_includes() {
        let content = parse_entries(r#"{"items": []}"#).unwrap();
        assert!(content.is_empty());
        assert!(content.questions.is_empty());
    }

    #[test]
    fn test_unknown_question_type() {
        let body = json!({
            "items": [],
            "includes": {"Entry": [{"sys": {"id": "q1"}, "fields": {"questionText": "?", "questionType": "essay"}}]}
        });
        assert!(parse_entries(&body.to_string()).is_err());
    }
}
