//! Deferred route registration

use hyper::Method;

use crate::di::{BindArgs, Container, ProduceArgs};
use crate::error::Error;
use super::{
    handlers::{Func, InjectedHandler, RouteHandler},
    response::IntoResponse,
    router::Router,
};

use std::sync::Arc;

/// Binds one recorded route's arguments against a container, producing the
/// handler to register.
type BindFn = Arc<
    dyn Fn(&Container) -> Result<RouteHandler, Error>
    + Send
    + Sync
>;

struct RouteEntry {
    method: Method,
    path: String,
    bind: BindFn,
}

/// Records route registrations without touching any real routing table.
///
/// Routes are declared before the application's dependencies exist; once a
/// [`Container`] is available, [`create_router`](Self::create_router) replays
/// every recorded registration in order with dependencies bound.
///
/// # Example
/// ```
/// use latewire::{di::{Arg, SlotSet}, http::InjectableRouter, Json};
///
/// let mut slots = SlotSet::new();
/// let answer = slots.declare::<i32>("answer");
///
/// let mut router = InjectableRouter::with_prefix("/api");
/// router.get("/answer", |n: i32| async move { Json(n) }, (Arg::Slot(answer),));
///
/// let container = slots.builder().bind(answer, || 42).build().unwrap();
/// let router = router.create_router(&container).unwrap();
/// assert_eq!(router.len(), 1);
/// ```
#[derive(Default)]
pub struct InjectableRouter {
    prefix: String,
    entries: Vec<RouteEntry>,
}

impl InjectableRouter {
    /// Creates a router with no path prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a router whose routes are all registered under `prefix`.
    pub fn with_prefix(prefix: &str) -> Self {
        Self { prefix: prefix.to_owned(), entries: Vec::new() }
    }

    /// Records a registration for `method` and `path`. The handler's
    /// arguments are declared through `args` and bound when the router is
    /// materialized; the handler itself is left untouched.
    pub fn route<F, Args>(&mut self, method: Method, path: &str, handler: F, args: Args) -> &mut Self
    where
        Args: BindArgs + Clone + Send + Sync + 'static,
        F: InjectedHandler<<Args::Bound as ProduceArgs>::Values>,
        F::Output: IntoResponse + 'static,
    {
        let bind: BindFn = Arc::new(move |container: &Container| {
            let bound = args.clone().bind(container)?;
            Ok(Func::new(handler.clone(), bound) as RouteHandler)
        });
        self.entries.push(RouteEntry { method, path: path.to_owned(), bind });
        self
    }

    /// Number of recorded registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no registrations are recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Materializes a fresh [`Router`]: binds every recorded route's
    /// arguments against `container` and registers the bound handlers in
    /// recorded order. Binding and registration errors propagate unmodified.
    ///
    /// Each call yields an independent router; recorded routes are never
    /// mutated, so repeated materialization is well-defined.
    pub fn create_router(&self, container: &Container) -> Result<Router, Error> {
        let mut router = Router::new(&self.prefix);
        for entry in &self.entries {
            #[cfg(feature = "tracing")]
            tracing::debug!(method = %entry.method, path = %entry.path, "registering route");
            let handler = (entry.bind)(container)?;
            router.register(entry.method.clone(), &entry.path, handler)?;
        }
        Ok(router)
    }
}

macro_rules! define_injectable_methods ({ $($method:ident => $verb:ident)* } => {
    impl InjectableRouter {
        $(
        #[doc = concat!("Records a registration for HTTP ", stringify!($verb), " requests at `path`.")]
        pub fn $method<F, Args>(&mut self, path: &str, handler: F, args: Args) -> &mut Self
        where
            Args: BindArgs + Clone + Send + Sync + 'static,
            F: InjectedHandler<<Args::Bound as ProduceArgs>::Values>,
            F::Output: IntoResponse + 'static,
        {
            self.route(Method::$verb, path, handler, args)
        }
        )*
    }
});

define_injectable_methods! {
    get => GET
    post => POST
    put => PUT
    patch => PATCH
    delete => DELETE
}
