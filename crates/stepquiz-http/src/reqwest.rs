use async_trait::async_trait;
use reqwest::{Request, Response};
use tokio::time::timeout;

use crate::core::{BaseHttpClient, HttpRequest, HttpResponse};
use crate::error::{Error, is_transient_status};
use crate::retry::{MaybeRetry, RetryConfig, with_backoff};

/// Retries transient failures. Other non-success responses are returned as
/// they are and left to the caller.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    retry: RetryConfig,
}

fn into_retry(error: Error) -> MaybeRetry<Error> {
    if error.is_transient() {
        MaybeRetry::MaybeRetry(error)
    } else {
        MaybeRetry::NoRetry(error)
    }
}

impl ReqwestHttpClient {
    pub fn new(retry: RetryConfig) -> Result<Self, Error> {
        let mut client_builder = reqwest::ClientBuilder::new();
        client_builder = client_builder.redirect(reqwest::redirect::Policy::limited(5));

        let client = client_builder.build()?;

        Ok(Self { client, retry })
    }

    fn build_request(&self, request: &HttpRequest) -> Result<Request, Error> {
        let mut request_builder = self
            .client
            .request(request.method().clone(), request.uri().to_string());
        for (name, value) in request.headers() {
            request_builder = request_builder.header(name.as_str(), value.as_bytes());
        }
        request_builder.body(request.body().clone()).build().map_err(Into::into)
    }

    async fn execute_request(&self, request: HttpRequest) -> Result<Response, Error> {
        let do_request = || {
            let request = &request;
            async move {
                let request: Request = self.build_request(request).map_err(MaybeRetry::NoRetry)?;
                tracing::debug!(method = %request.method(), url = %request.url(), "sending request");
                let response = self
                    .client
                    .execute(request)
                    .await
                    .map_err(|err| into_retry(err.into()))?;
                if is_transient_status(response.status()) {
                    Err(MaybeRetry::MaybeRetry(Error::StatusCode(Box::new(response))))
                } else {
                    Ok(response)
                }
            }
        };

        timeout(self.retry.total_timeout, with_backoff(&self.retry, do_request))
            .await
            .map_err(|_| Error::Timeout)?
    }
}

#[async_trait]
impl BaseHttpClient for ReqwestHttpClient {
    type Error = Error;

    async fn request_text(&self, request: HttpRequest) -> Result<HttpResponse<String>, Self::Error> {
        let response = self.execute_request(request).await?;
        let status_code = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;

        let mut http_response = http::response::Response::builder().status(status_code);
        if let Some(header_map) = http_response.headers_mut() {
            header_map.extend(headers);
        }
        http_response.body(text).map_err(Into::into)
    }
}
