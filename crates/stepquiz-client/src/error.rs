use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("Received invalid json data: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),

    #[error("url cannot be used as a base: {0}")]
    CannotBeABase(String),

    #[error(transparent)]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
}

#[derive(Error, Debug)]
pub enum HttpError {
    #[error(transparent)]
    Stepquiz(#[from] stepquiz_http::Error),

    #[error("Request failed ({1}): {0}")]
    Status(String, StatusCode),

    #[error(transparent)]
    UrlToUri(#[from] uri_url::UrlToUriError),

    #[error(transparent)]
    Http(#[from] http::Error),
}
