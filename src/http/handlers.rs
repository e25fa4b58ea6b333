//! Route handler plumbing

use futures_util::future::BoxFuture;

use crate::di::ProduceArgs;
use super::response::{HttpResult, IntoResponse};

use std::{future::Future, sync::Arc};

/// Represents a specific registered request handler.
pub(crate) type RouteHandler = Arc<
    dyn Handler
    + Send
    + Sync
>;

pub(crate) trait Handler {
    fn call(&self) -> BoxFuture<'static, HttpResult>;
}

/// Adapts an async closure plus its bound argument list into a route handler.
/// Argument values are produced fresh for every request.
pub(crate) struct Func<F, Args>
where
    F: InjectedHandler<Args::Values>,
    Args: ProduceArgs,
{
    func: F,
    args: Args,
}

impl<F, Args> Func<F, Args>
where
    F: InjectedHandler<Args::Values>,
    Args: ProduceArgs,
{
    /// Creates a new [`Func`] wrapped into [`Arc`].
    pub(crate) fn new(func: F, args: Args) -> Arc<Self> {
        Arc::new(Self { func, args })
    }
}

impl<F, Args> Handler for Func<F, Args>
where
    F: InjectedHandler<Args::Values>,
    F::Output: IntoResponse + 'static,
    Args: ProduceArgs,
{
    #[inline]
    fn call(&self) -> BoxFuture<'static, HttpResult> {
        let values = self.args.produce();
        let fut = self.func.call(values);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// Describes a generic request handler taking 0 to N injected arguments.
pub trait InjectedHandler<Args>: Clone + Send + Sync + 'static {
    /// The handler's return type.
    type Output;
    /// The future resolving to [`Self::Output`].
    type Future: Future<Output = Self::Output> + Send + 'static;

    /// Invokes the handler with the produced argument values.
    fn call(&self, args: Args) -> Self::Future;
}

macro_rules! define_injected_handler ({ $($param:ident)* } => {
    impl<Func, Fut, $($param,)*> InjectedHandler<($($param,)*)> for Func
    where
        Func: Fn($($param),*) -> Fut + Send + Sync + Clone + 'static,
        Fut: Future + Send + 'static,
    {
        type Output = Fut::Output;
        type Future = Fut;

        #[inline]
        #[allow(non_snake_case)]
        fn call(&self, ($($param,)*): ($($param,)*)) -> Self::Future {
            (self)($($param,)*)
        }
    }
});

define_injected_handler! {}
define_injected_handler! { T1 }
define_injected_handler! { T1 T2 }
define_injected_handler! { T1 T2 T3 }
define_injected_handler! { T1 T2 T3 T4 }
define_injected_handler! { T1 T2 T3 T4 T5 }

#[cfg(test)]
mod tests {
    use super::{Func, Handler};
    use crate::di::{Arg, BindArgs, SlotSet};
    use crate::Json;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn it_feeds_bound_arguments_to_the_handler() {
        let mut slots = SlotSet::new();
        let x = slots.declare::<i32>("x");
        let container = slots.builder().bind(x, || 5).build().unwrap();

        let bound = (Arg::Slot(x), Arg::Value(2)).bind(&container).unwrap();
        let handler = Func::new(|a: i32, b: i32| async move { Json(a + b) }, bound);

        let response = handler.call().await.unwrap();
        let body = response.into_body().collect().await.unwrap().to_bytes();

        assert_eq!(&body[..], b"7");
    }

    #[tokio::test]
    async fn it_supports_zero_argument_handlers() {
        let handler = Func::new(|| async { "ok" }, ());

        let response = handler.call().await.unwrap();

        assert_eq!(response.status(), hyper::StatusCode::OK);
    }
}
