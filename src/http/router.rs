//! The materialized routing table

use hyper::Method;
use indexmap::IndexMap;

use crate::error::Error;
use super::handlers::RouteHandler;

const ALLOW_METHOD_SEPARATOR: &str = ", ";

/// Statuses that can be returned after route matching.
pub(crate) enum RouteMatch<'a> {
    Found(&'a RouteHandler),
    MethodNotAllowed(String),
    NotFound,
}

/// The real routing table produced by
/// [`InjectableRouter::create_router`](super::InjectableRouter::create_router).
///
/// Holds fully bound handlers keyed by method and path; registration order is
/// preserved.
pub struct Router {
    prefix: String,
    routes: IndexMap<String, IndexMap<Method, RouteHandler>>,
    order: Vec<(Method, String)>,
}

impl Router {
    pub(crate) fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_owned(),
            routes: IndexMap::new(),
            order: Vec::new(),
        }
    }

    /// The path prefix applied to every registered route.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number of registered method/path pairs.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registered routes in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&Method, &str)> {
        self.order.iter().map(|(method, path)| (method, path.as_str()))
    }

    /// Registers `handler` under `method` and `path` (the router prefix is
    /// prepended). Fails on a path that does not start with `/` or on a
    /// duplicate method/path pair.
    pub(crate) fn register(
        &mut self,
        method: Method,
        path: &str,
        handler: RouteHandler,
    ) -> Result<(), Error> {
        if !path.starts_with('/') {
            return Err(Error::InvalidRoute(path.to_owned()));
        }
        let full_path = [self.prefix.as_str(), path].concat();
        let methods = self.routes.entry(full_path.clone()).or_default();
        if methods.contains_key(&method) {
            return Err(Error::DuplicateRoute(format!("{method} {full_path}")));
        }
        methods.insert(method.clone(), handler);
        self.order.push((method, full_path));
        Ok(())
    }

    /// Matches a request against the table.
    #[inline]
    pub(crate) fn find(&self, method: &Method, path: &str) -> RouteMatch<'_> {
        let Some(methods) = self.routes.get(path) else {
            return RouteMatch::NotFound;
        };
        match methods.get(method) {
            Some(handler) => RouteMatch::Found(handler),
            None => {
                let allowed = methods
                    .keys()
                    .map(Method::as_str)
                    .collect::<Vec<_>>()
                    .join(ALLOW_METHOD_SEPARATOR);
                RouteMatch::MethodNotAllowed(allowed)
            }
        }
    }

    /// Merges another materialized router into this one; on a method/path
    /// conflict the first registration wins.
    pub fn merge(&mut self, other: Router) {
        for (method, full_path) in other.order {
            let Some(handler) = other.routes
                .get(&full_path)
                .and_then(|methods| methods.get(&method))
            else {
                continue;
            };
            let methods = self.routes.entry(full_path.clone()).or_default();
            if methods.contains_key(&method) {
                continue;
            }
            methods.insert(method.clone(), handler.clone());
            self.order.push((method, full_path));
        }
    }
}
