//! HTTP response tools

use bytes::Bytes;
use http_body_util::{BodyExt, Empty, Full};
use hyper::Response;
use serde::Serialize;

use crate::{error::Error, Json};

use std::convert::Infallible;

pub use hyper::header::{ALLOW, CONTENT_TYPE};

/// Error message used when a response cannot be built.
pub const RESPONSE_ERROR: &str = "HTTP Response: unable to create a response";

/// Boxed response body.
pub type BoxBody = http_body_util::combinators::BoxBody<Bytes, Infallible>;

/// The response produced by request handlers.
pub type HttpResponse = Response<BoxBody>;

/// The result of handling a request.
pub type HttpResult = Result<HttpResponse, Error>;

/// Creates a default HTTP response builder.
pub fn builder() -> hyper::http::response::Builder {
    Response::builder()
}

/// An empty response body.
pub fn empty() -> BoxBody {
    Empty::new()
        .map_err(|never| match never {})
        .boxed()
}

/// A response body holding `chunk`.
pub fn full<T: Into<Bytes>>(chunk: T) -> BoxBody {
    Full::new(chunk.into())
        .map_err(|never| match never {})
        .boxed()
}

/// A response body holding `value` serialized as JSON.
pub fn json<T: Serialize>(value: &T) -> Result<BoxBody, Error> {
    serde_json::to_vec(value)
        .map(full)
        .map_err(Error::Serialize)
}

/// Builds a `200 OK` response carrying `value` serialized as JSON.
pub fn json_response<T: Serialize>(value: &T) -> HttpResult {
    builder()
        .status(hyper::StatusCode::OK)
        .header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(json(value)?)
        .map_err(|_| Error::Response(RESPONSE_ERROR))
}

/// Builds a plain-text response with the given status.
pub fn text_response<S, B>(status: S, body: B) -> HttpResult
where
    hyper::StatusCode: TryFrom<S>,
    <hyper::StatusCode as TryFrom<S>>::Error: Into<hyper::http::Error>,
    B: Into<Bytes>,
{
    builder()
        .status(status)
        .header(CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.as_ref())
        .body(full(body))
        .map_err(|_| Error::Response(RESPONSE_ERROR))
}

/// Creates an HTTP response with `status`, `body` and `headers`.
#[macro_export]
macro_rules! response {
    ($status:expr, $body:expr) => {
        $crate::response!($status, $body, [])
    };
    ($status:expr, $body:expr, [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {
        $crate::http::response::builder()
            .status($status)
        $(
            .header($key, $value)
        )*
            .body($body)
            .map_err(|_| $crate::error::Error::Response($crate::http::response::RESPONSE_ERROR))
    };
}

/// Creates an HTTP response with the given status code and an optional
/// plain-text body or header list.
#[macro_export]
macro_rules! status {
    ($status:expr) => {
        $crate::response!($status, $crate::http::response::empty())
    };
    ($status:expr, [ $( ($key:expr, $value:expr) ),* $(,)? ]) => {
        $crate::response!($status, $crate::http::response::empty(), [ $( ($key, $value) ),* ])
    };
    ($status:expr, $body:expr) => {
        $crate::http::response::text_response($status, $body)
    };
}

/// Creates a `200 OK` response, optionally with a JSON body.
#[macro_export]
macro_rules! ok {
    () => {
        $crate::status!(200)
    };
    ($value:expr) => {
        $crate::http::response::json_response(&$value)
    };
}

/// Trait for types that can be returned from request handlers.
pub trait IntoResponse {
    /// Converts `self` into an HTTP response.
    fn into_response(self) -> HttpResult;
}

impl IntoResponse for HttpResponse {
    #[inline]
    fn into_response(self) -> HttpResult {
        Ok(self)
    }
}

impl IntoResponse for () {
    #[inline]
    fn into_response(self) -> HttpResult {
        ok!()
    }
}

impl IntoResponse for Infallible {
    #[inline]
    fn into_response(self) -> HttpResult {
        match self {}
    }
}

impl IntoResponse for &'static str {
    #[inline]
    fn into_response(self) -> HttpResult {
        response!(
            hyper::StatusCode::OK,
            full(self),
            [(CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.as_ref())]
        )
    }
}

impl IntoResponse for String {
    #[inline]
    fn into_response(self) -> HttpResult {
        response!(
            hyper::StatusCode::OK,
            full(self),
            [(CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.as_ref())]
        )
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> HttpResult {
        ok!(self.into_inner())
    }
}

impl<T, E> IntoResponse for Result<T, E>
where
    T: IntoResponse,
    E: Into<Error>,
{
    #[inline]
    fn into_response(self) -> HttpResult {
        match self {
            Ok(ok) => ok.into_response(),
            Err(err) => Err(err.into()),
        }
    }
}
