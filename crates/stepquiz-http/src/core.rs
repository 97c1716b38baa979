use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub type HttpRequest = http::request::Request<Vec<u8>>;

pub type HttpResponse<T> = http::response::Response<T>;

/// Transport used by the API clients.
///
/// Implementors only send requests and return the body as text; decoding JSON
/// is shared so fakes and the real client parse responses the same way.
#[async_trait]
pub trait BaseHttpClient: Send + Sync + Clone {
    type Error: From<serde_json::Error> + Send;

    async fn request_text(&self, request: HttpRequest) -> Result<HttpResponse<String>, Self::Error>;

    async fn request_json<T: DeserializeOwned + Send>(&self, request: HttpRequest) -> Result<HttpResponse<T>, Self::Error> {
        let (parts, body) = self.request_text(request).await?.into_parts();
        let body = serde_json::from_str(&body)?;
        Ok(HttpResponse::from_parts(parts, body))
    }
}
