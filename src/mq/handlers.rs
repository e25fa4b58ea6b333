//! Channel handler plumbing

use bytes::Bytes;
use futures_util::future::BoxFuture;
use serde::Serialize;

use crate::{di::ProduceArgs, error::Error, Json};
use super::message::Message;

use std::{future::Future, sync::Arc};

/// Represents a registered subscriber or publisher handler.
pub(crate) type ChannelRouteHandler = Arc<
    dyn MqHandler
    + Send
    + Sync
>;

pub(crate) trait MqHandler {
    /// Handles a message, optionally producing an outbound payload.
    fn call(&self, msg: Message) -> BoxFuture<'static, Result<Option<Bytes>, Error>>;
}

/// Adapts an async closure plus its bound argument list into a channel
/// handler. Argument values are produced fresh for every message.
pub(crate) struct MqFunc<F, Args>
where
    F: ChannelHandler<Args::Values>,
    Args: ProduceArgs,
{
    func: F,
    args: Args,
}

impl<F, Args> MqFunc<F, Args>
where
    F: ChannelHandler<Args::Values>,
    Args: ProduceArgs,
{
    pub(crate) fn new(func: F, args: Args) -> Arc<Self> {
        Arc::new(Self { func, args })
    }
}

impl<F, Args> MqHandler for MqFunc<F, Args>
where
    F: ChannelHandler<Args::Values>,
    F::Output: IntoPayload + 'static,
    Args: ProduceArgs,
{
    #[inline]
    fn call(&self, msg: Message) -> BoxFuture<'static, Result<Option<Bytes>, Error>> {
        let values = self.args.produce();
        let fut = self.func.call(msg, values);
        Box::pin(async move { fut.await.into_payload() })
    }
}

/// Describes a channel handler taking the inbound message plus 0 to N
/// injected arguments.
pub trait ChannelHandler<Args>: Clone + Send + Sync + 'static {
    /// The handler's return type.
    type Output;
    /// The future resolving to [`Self::Output`].
    type Future: Future<Output = Self::Output> + Send + 'static;

    /// Invokes the handler with the inbound message and produced values.
    fn call(&self, msg: Message, args: Args) -> Self::Future;
}

macro_rules! define_channel_handler ({ $($param:ident)* } => {
    impl<Func, Fut, $($param,)*> ChannelHandler<($($param,)*)> for Func
    where
        Func: Fn(Message, $($param),*) -> Fut + Send + Sync + Clone + 'static,
        Fut: Future + Send + 'static,
    {
        type Output = Fut::Output;
        type Future = Fut;

        #[inline]
        #[allow(non_snake_case)]
        fn call(&self, msg: Message, ($($param,)*): ($($param,)*)) -> Self::Future {
            (self)(msg, $($param),*)
        }
    }
});

define_channel_handler! {}
define_channel_handler! { T1 }
define_channel_handler! { T1 T2 }
define_channel_handler! { T1 T2 T3 }
define_channel_handler! { T1 T2 T3 T4 }
define_channel_handler! { T1 T2 T3 T4 T5 }

/// Converts a channel handler's return into an optional outbound payload.
pub trait IntoPayload {
    /// `None` means there is nothing to publish.
    fn into_payload(self) -> Result<Option<Bytes>, Error>;
}

impl IntoPayload for () {
    #[inline]
    fn into_payload(self) -> Result<Option<Bytes>, Error> {
        Ok(None)
    }
}

impl IntoPayload for Bytes {
    #[inline]
    fn into_payload(self) -> Result<Option<Bytes>, Error> {
        Ok(Some(self))
    }
}

impl IntoPayload for String {
    #[inline]
    fn into_payload(self) -> Result<Option<Bytes>, Error> {
        Ok(Some(Bytes::from(self)))
    }
}

impl IntoPayload for &'static str {
    #[inline]
    fn into_payload(self) -> Result<Option<Bytes>, Error> {
        Ok(Some(Bytes::from(self)))
    }
}

impl<T: Serialize> IntoPayload for Json<T> {
    fn into_payload(self) -> Result<Option<Bytes>, Error> {
        let payload = serde_json::to_vec(&self.into_inner())?;
        Ok(Some(Bytes::from(payload)))
    }
}

impl<T, E> IntoPayload for Result<T, E>
where
    T: IntoPayload,
    E: Into<Error>,
{
    #[inline]
    fn into_payload(self) -> Result<Option<Bytes>, Error> {
        match self {
            Ok(ok) => ok.into_payload(),
            Err(err) => Err(err.into()),
        }
    }
}
