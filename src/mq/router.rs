//! The materialized broker routing table

use indexmap::IndexMap;

use crate::error::Error;
use super::{handlers::ChannelRouteHandler, message::Message};

/// The real broker routing table produced by
/// [`InjectableMqRouter::create_router`](super::InjectableMqRouter::create_router).
///
/// Doubles as a small in-process broker: subscriber handlers run on
/// [`dispatch`](Self::dispatch), publisher handlers transform messages on
/// [`publish`](Self::publish). Handlers run in registration order.
pub struct MqRouter {
    subscribers: IndexMap<String, Vec<ChannelRouteHandler>>,
    publishers: IndexMap<String, Vec<ChannelRouteHandler>>,
}

impl MqRouter {
    pub(crate) fn new() -> Self {
        Self {
            subscribers: IndexMap::new(),
            publishers: IndexMap::new(),
        }
    }

    /// Number of registered subscriber handlers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.values().map(Vec::len).sum()
    }

    /// Number of registered publisher handlers.
    pub fn publisher_count(&self) -> usize {
        self.publishers.values().map(Vec::len).sum()
    }

    /// Channels with at least one subscriber, in registration order.
    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.subscribers.keys().map(String::as_str)
    }

    pub(crate) fn register_subscriber(
        &mut self,
        channel: &str,
        handler: ChannelRouteHandler,
    ) -> Result<(), Error> {
        if channel.is_empty() {
            return Err(Error::InvalidRoute("subscriber channel must not be empty".into()));
        }
        self.subscribers.entry(channel.to_owned()).or_default().push(handler);
        Ok(())
    }

    pub(crate) fn register_publisher(
        &mut self,
        channel: &str,
        handler: ChannelRouteHandler,
    ) -> Result<(), Error> {
        if channel.is_empty() {
            return Err(Error::InvalidRoute("publisher channel must not be empty".into()));
        }
        self.publishers.entry(channel.to_owned()).or_default().push(handler);
        Ok(())
    }

    /// Delivers `msg` to every subscriber of its channel, in registration
    /// order. Subscriber return payloads are discarded; a message for a
    /// channel without subscribers is dropped.
    pub async fn dispatch(&self, msg: Message) -> Result<(), Error> {
        let Some(handlers) = self.subscribers.get(msg.channel()) else {
            return Ok(());
        };
        for handler in handlers {
            handler.call(msg.clone()).await?;
        }
        Ok(())
    }

    /// Publishes to `channel`: runs the channel's publisher handlers with
    /// `msg`, delivering each produced payload to the channel's subscribers.
    /// With no publisher registered the message is delivered as-is.
    pub async fn publish(&self, channel: &str, msg: Message) -> Result<(), Error> {
        match self.publishers.get(channel) {
            Some(handlers) if !handlers.is_empty() => {
                for handler in handlers {
                    if let Some(payload) = handler.call(msg.clone()).await? {
                        self.dispatch(Message::new(channel, payload)).await?;
                    }
                }
                Ok(())
            }
            _ => self.dispatch(Message::new(channel, msg.into_payload())).await,
        }
    }
}
