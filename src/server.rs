//! HTTP request dispatch for accepted connections

use futures_util::future::BoxFuture;
use hyper::{body::Incoming, service::Service, Request};

use crate::{
    app::AppInstance,
    error::Error,
    http::{
        response::{HttpResponse, HttpResult, ALLOW},
        router::RouteMatch,
    },
    status,
};

use std::sync::Arc;

/// Represents the execution scope of the current connection.
#[derive(Clone)]
pub(crate) struct Scope {
    shared: Arc<AppInstance>,
}

impl Scope {
    pub(crate) fn new(shared: Arc<AppInstance>) -> Self {
        Self { shared }
    }

    async fn handle_request(request: Request<Incoming>, shared: Arc<AppInstance>) -> HttpResult {
        let handler = match shared.routes.find(request.method(), request.uri().path()) {
            RouteMatch::NotFound => return status!(404),
            RouteMatch::MethodNotAllowed(allowed) => return status!(405, [(ALLOW, allowed)]),
            RouteMatch::Found(handler) => handler.clone(),
        };
        match handler.call().await {
            Ok(response) => Ok(response),
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::error!("handler error: {err}");
                status!(err.status_code(), err.to_string())
            }
        }
    }
}

impl Service<Request<Incoming>> for Scope {
    type Response = HttpResponse;
    type Error = Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    #[inline]
    fn call(&self, request: Request<Incoming>) -> Self::Future {
        let shared = self.shared.clone();
        Box::pin(Self::handle_request(request, shared))
    }
}
