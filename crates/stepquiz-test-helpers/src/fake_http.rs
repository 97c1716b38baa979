use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use stepquiz_http::{BaseHttpClient, Error, HttpRequest, HttpResponse};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Debug)]
enum Reply {
    Response(StatusCode, String),
    Timeout,
}

/// Answers requests from a queue of canned replies and records what was sent.
///
/// An exhausted queue answers with [`Error::Timeout`].
#[derive(Debug, Clone, Default)]
pub struct FakeHttpClient {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeHttpClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn respond(self, status: StatusCode, body: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Response(status, body.into()));
        self
    }

    #[must_use]
    pub fn time_out(self) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Timeout);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseHttpClient for FakeHttpClient {
    type Error = Error;

    async fn request_text(&self, request: HttpRequest) -> Result<HttpResponse<String>, Self::Error> {
        let (parts, body) = request.into_parts();
        self.requests.lock().unwrap().push(RecordedRequest {
            method: parts.method,
            uri: parts.uri.to_string(),
            headers: parts.headers,
            body,
        });

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Response(status, body)) => Ok(http::Response::builder().status(status).body(body)?),
            Some(Reply::Timeout) | None => Err(Error::Timeout),
        }
    }
}
