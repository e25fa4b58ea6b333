//! Deferred channel registration

use crate::di::{BindArgs, Container, ProduceArgs};
use crate::error::Error;
use super::{
    handlers::{ChannelHandler, ChannelRouteHandler, IntoPayload, MqFunc},
    router::MqRouter,
};

use std::sync::Arc;

type BindFn = Arc<
    dyn Fn(&Container) -> Result<ChannelRouteHandler, Error>
    + Send
    + Sync
>;

enum EntryKind {
    Subscriber,
    Publisher,
}

struct ChannelEntry {
    kind: EntryKind,
    channel: String,
    bind: BindFn,
}

/// Records subscriber and publisher registrations without touching any real
/// broker routing table; [`create_router`](Self::create_router) replays them
/// in recorded order once dependencies are available.
#[derive(Default)]
pub struct InjectableMqRouter {
    entries: Vec<ChannelEntry>,
}

impl InjectableMqRouter {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a subscriber for `channel`; the handler runs for every
    /// message delivered to the channel.
    pub fn subscriber<F, Args>(&mut self, channel: &str, handler: F, args: Args) -> &mut Self
    where
        Args: BindArgs + Clone + Send + Sync + 'static,
        F: ChannelHandler<<Args::Bound as ProduceArgs>::Values>,
        F::Output: IntoPayload + 'static,
    {
        self.entry(EntryKind::Subscriber, channel, handler, args)
    }

    /// Records a publisher for `channel`; the handler's returned payload is
    /// delivered to the channel's subscribers.
    pub fn publisher<F, Args>(&mut self, channel: &str, handler: F, args: Args) -> &mut Self
    where
        Args: BindArgs + Clone + Send + Sync + 'static,
        F: ChannelHandler<<Args::Bound as ProduceArgs>::Values>,
        F::Output: IntoPayload + 'static,
    {
        self.entry(EntryKind::Publisher, channel, handler, args)
    }

    fn entry<F, Args>(&mut self, kind: EntryKind, channel: &str, handler: F, args: Args) -> &mut Self
    where
        Args: BindArgs + Clone + Send + Sync + 'static,
        F: ChannelHandler<<Args::Bound as ProduceArgs>::Values>,
        F::Output: IntoPayload + 'static,
    {
        let bind: BindFn = Arc::new(move |container: &Container| {
            let bound = args.clone().bind(container)?;
            Ok(MqFunc::new(handler.clone(), bound) as ChannelRouteHandler)
        });
        self.entries.push(ChannelEntry { kind, channel: channel.to_owned(), bind });
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

    /// Materializes a fresh [`MqRouter`], binding every recorded handler's
    /// arguments against `container` in recorded order. Binding and
    /// registration errors propagate unmodified.
    pub fn create_router(&self, container: &Container) -> Result<MqRouter, Error> {
        let mut router = MqRouter::new();
        for entry in &self.entries {
            #[cfg(feature = "tracing")]
            tracing::debug!(channel = %entry.channel, "registering channel handler");
            let handler = (entry.bind)(container)?;
            match entry.kind {
                EntryKind::Subscriber => router.register_subscriber(&entry.channel, handler)?,
                EntryKind::Publisher => router.register_publisher(&entry.channel, handler)?,
            }
        }
        Ok(router)
    }
}
