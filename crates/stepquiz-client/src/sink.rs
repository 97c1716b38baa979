use crate::client::base::{BaseClient, Config, build_request};
use crate::error::{Error, HttpError, InternalError};
use async_trait::async_trait;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, Method};
use stepquiz_core::sink::{ResultsSink, SinkError};
use stepquiz_http::{BaseHttpClient, HttpClient};
use stepquiz_model::quiz::submission::SubmissionRecord;
use url::Url;

const APPLICATION_ID_HEADER: &str = "x-algolia-application-id";
const API_KEY_HEADER: &str = "x-algolia-api-key";

#[derive(Debug, Clone)]
pub struct SearchIndexConfig {
    pub app_id: String,
    pub api_key: String,
    pub index_name: String,
    /// Defaults to `https://{app_id}.algolia.net`.
    pub base_url: Option<Url>,
}

impl SearchIndexConfig {
    pub fn base_url(&self) -> Result<Url, InternalError> {
        match &self.base_url {
            Some(url) => Ok(url.clone()),
            None => Url::parse(&format!("https://{}.algolia.net", self.app_id)).map_err(Into::into),
        }
    }
}

/// Stores each submission as one object of a search index, keyed by its object id.
pub struct SearchIndexSink<H = HttpClient> {
    config: Config,
    index: SearchIndexConfig,
    http_client: H,
}

impl<H: BaseHttpClient<Error = stepquiz_http::Error>> SearchIndexSink<H> {
    pub fn new(index: SearchIndexConfig, http_client: H) -> Result<Self, InternalError> {
        Ok(Self {
            config: Config::new(index.base_url()?),
            index,
            http_client,
        })
    }

    fn headers(&self) -> Result<HeaderMap, InternalError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(APPLICATION_ID_HEADER, HeaderValue::from_str(&self.index.app_id)?);
        let mut api_key = HeaderValue::from_str(&self.index.api_key)?;
        api_key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, api_key);
        Ok(headers)
    }

    pub async fn save_object(&self, record: &SubmissionRecord) -> Result<(), Error> {
        let object_id = record.object_id.to_string();
        let url = self
            .config
            .base_url
            .for_segments(["1", "indexes", self.index.index_name.as_str(), object_id.as_str()])?;
        let body = serde_json::to_vec(record)?;
        let request = build_request(Method::PUT, &url, self.headers()?, body)?;
        self.api_send_request(request).await?;
        tracing::debug!(index = %self.index.index_name, %object_id, "saved object");
        Ok(())
    }
}

impl<H: BaseHttpClient<Error = stepquiz_http::Error>> BaseClient for SearchIndexSink<H> {
    type Http = H;

    fn get_http_client(&self) -> &H {
        &self.http_client
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl<H: BaseHttpClient<Error = stepquiz_http::Error>> ResultsSink for SearchIndexSink<H> {
    async fn store(&self, record: &SubmissionRecord) -> Result<(), SinkError> {
        self.save_object(record).await.map_err(|err| match err {
            Error::Http(HttpError::Status(body, status)) => SinkError::Rejected(format!("{status}: {body}")),
            err => SinkError::store(err),
        })
    }
}
