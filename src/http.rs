//! HTTP routing surface
//!
//! An [`InjectableRouter`] records route registrations without touching any
//! real routing table; [`InjectableRouter::create_router`] materializes a
//! [`Router`] with every deferred dependency bound. A materialized router is
//! served through [`App`](crate::App).

// Re-exporting HTTP verbs and status codes from hyper/http
pub use hyper::{http::Method, StatusCode};

pub use injectable::InjectableRouter;
pub use response::{HttpResponse, HttpResult, IntoResponse};
pub use router::Router;

pub use handlers::InjectedHandler;

pub(crate) mod handlers;
pub mod injectable;
pub mod response;
pub mod router;
