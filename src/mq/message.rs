//! Broker messages

use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Error;

/// A broker message: a channel name plus an opaque payload.
#[derive(Debug, Clone)]
pub struct Message {
    channel: String,
    payload: Bytes,
}

impl Message {
    /// Creates a message for `channel` with a raw payload.
    pub fn new(channel: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self { channel: channel.into(), payload: payload.into() }
    }

    /// Creates a message with a UTF-8 text payload.
    pub fn text(channel: impl Into<String>, text: &str) -> Self {
        Self::new(channel, text.to_owned())
    }

    /// Creates a message with `value` serialized as JSON.
    pub fn json<T: Serialize>(channel: impl Into<String>, value: &T) -> Result<Self, Error> {
        let payload = serde_json::to_vec(value)?;
        Ok(Self::new(channel, payload))
    }

    /// The channel this message targets.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// The raw payload.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Deserializes the payload as JSON.
    pub fn json_payload<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.payload).map_err(Error::Serialize)
    }

    /// Consumes the message, returning its payload.
    pub fn into_payload(self) -> Bytes {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::Message;

    #[test]
    fn it_round_trips_json_payloads() {
        let msg = Message::json("orders", &5).unwrap();

        assert_eq!(msg.channel(), "orders");
        assert_eq!(msg.json_payload::<i32>().unwrap(), 5);
    }

    #[test]
    fn it_carries_text_payloads() {
        let msg = Message::text("logs", "hello");

        assert_eq!(&msg.into_payload()[..], b"hello");
    }
}
