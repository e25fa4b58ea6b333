//! Describes injection and routing errors

use std::error::Error as StdError;
use std::fmt::{Display, Formatter};

/// A boxed error produced by a user handler.
pub type BoxError = Box<
    dyn StdError
    + Send
    + Sync
>;

/// Errors raised while binding dependencies or registering routes.
#[derive(Debug)]
pub enum Error {
    /// A declared slot was never bound to a provider.
    SlotUnbound(&'static str),
    /// A slot reference was resolved against a container that never declared it.
    SlotMissing(&'static str),
    /// A bound provider could not be downcast to the slot's declared type.
    ResolveFailed(&'static str),
    /// A route path does not start with `/`.
    InvalidRoute(String),
    /// A method/path or channel pair was registered twice on the same router.
    DuplicateRoute(String),
    /// An HTTP response could not be built.
    Response(&'static str),
    /// A payload could not be serialized.
    Serialize(serde_json::Error),
    /// An error raised by a user handler.
    Handler(BoxError),
}

impl Error {
    /// Wraps a handler error.
    pub fn handler(err: impl Into<BoxError>) -> Self {
        Error::Handler(err.into())
    }

    /// The HTTP status this error maps to when it surfaces from a request handler.
    #[cfg(feature = "http")]
    pub fn status_code(&self) -> hyper::StatusCode {
        use hyper::StatusCode;
        match self {
            Error::InvalidRoute(_) | Error::DuplicateRoute(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::SlotUnbound(name) => write!(f, "Container Error: slot `{name}` has no bound provider"),
            Error::SlotMissing(name) => write!(f, "Container Error: slot `{name}` is not declared in this container"),
            Error::ResolveFailed(name) => write!(f, "Container Error: unable to resolve the provider for slot `{name}`"),
            Error::InvalidRoute(route) => write!(f, "Routing Error: invalid route: {route}"),
            Error::DuplicateRoute(route) => write!(f, "Routing Error: route registered twice: {route}"),
            Error::Response(msg) => write!(f, "{msg}"),
            Error::Serialize(err) => write!(f, "Serialization Error: {err}"),
            Error::Handler(err) => err.fmt(f),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Serialize(err) => Some(err),
            Error::Handler(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Handler(err.into())
    }
}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        Self::other(err)
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn it_formats_slot_errors() {
        let err = Error::SlotUnbound("db");
        assert_eq!(err.to_string(), "Container Error: slot `db` has no bound provider");

        let err = Error::SlotMissing("db");
        assert_eq!(err.to_string(), "Container Error: slot `db` is not declared in this container");
    }

    #[test]
    fn it_formats_route_errors() {
        let err = Error::DuplicateRoute("GET /foo".into());
        assert_eq!(err.to_string(), "Routing Error: route registered twice: GET /foo");
    }

    #[test]
    #[cfg(feature = "http")]
    fn it_maps_handler_errors_to_500() {
        let err = Error::handler(std::io::Error::other("boom"));
        assert_eq!(err.status_code(), hyper::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
