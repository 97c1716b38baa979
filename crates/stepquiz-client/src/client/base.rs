use crate::error::{HttpError, InternalError};
use async_trait::async_trait;
use http::{HeaderMap, Method};
use stepquiz_http::{BaseHttpClient, HttpRequest, HttpResponse};
use uri_url::url_to_uri;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: ApiUrl,
}

impl Config {
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: ApiUrl::new(base_url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrl {
    url: Url,
}

impl ApiUrl {
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// Appends percent-encoded path segments to the base url.
    pub fn for_segments<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, InternalError> {
        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|()| InternalError::CannotBeABase(self.url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

pub(crate) fn build_request(method: Method, url: &Url, headers: HeaderMap, body: Vec<u8>) -> Result<HttpRequest, HttpError> {
    let mut request_builder = http::request::Request::builder()
        .method(method)
        .uri(url_to_uri(url).map_err(HttpError::from)?);
    if let Some(header_map) = request_builder.headers_mut() {
        header_map.extend(headers);
    }
    request_builder.body(body).map_err(Into::into)
}

#[async_trait]
pub trait BaseClient: Sync {
    type Http: BaseHttpClient<Error = stepquiz_http::Error>;

    fn get_http_client(&self) -> &Self::Http;
    fn get_config(&self) -> &Config;

    async fn api_send_request(&self, request: HttpRequest) -> Result<HttpResponse<String>, HttpError> {
        tracing::debug!(method = ?request.method(), uri = ?request.uri(), "Sending API request");
        let response = self.get_http_client().request_text(request).await?;
        if !response.status().is_success() {
            let status = response.status();
            return Err(HttpError::Status(response.into_body(), status));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_segments() {
        let api = ApiUrl::new(Url::parse("https://cdn.example.com/").unwrap());
        let url = api.for_segments(["spaces", "my space", "entries"]).unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/spaces/my%20space/entries");

        let api = ApiUrl::new(Url::parse("http://localhost:8080/proxy").unwrap());
        let url = api.for_segments(["1", "indexes"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/proxy/1/indexes");
    }

    #[test]
    fn test_cannot_be_a_base() {
        let api = ApiUrl::new(Url::parse("mailto:quiz@example.com").unwrap());
        assert!(matches!(api.for_segments(["x"]), Err(InternalError::CannotBeABase(_))));
    }

    #[test]
    fn test_build_request() {
        let mut headers = HeaderMap::new();
        headers.insert("x-test", "1".parse().unwrap());
        let url = Url::parse("https://example.com/a?b=c").unwrap();
        let request = build_request(Method::PUT, &url, headers, b"{}".to_vec()).unwrap();
        assert_eq!(request.method(), Method::PUT);
        assert_eq!(request.uri(), "https://example.com/a?b=c");
        assert_eq!(request.headers()["x-test"], "1");
        assert_eq!(request.body(), b"{}");
    }

    #[test]
    fn test_build_request_needs_host() {
        let url = Url::parse("mailto:quiz@example.com").unwrap();
        let result = build_request(Method::GET, &url, HeaderMap::new(), Vec::new());
        assert!(matches!(result, Err(HttpError::UrlToUri(_))));
    }
}
