//! Message-queue routing surface
//!
//! Mirrors the HTTP surface for broker-style handlers: an
//! [`InjectableMqRouter`] records `subscriber`/`publisher` registrations and
//! [`InjectableMqRouter::create_router`] materializes an [`MqRouter`] with
//! every deferred dependency bound. The materialized router doubles as a
//! small in-process broker: [`MqRouter::dispatch`] delivers messages to
//! subscribers, [`MqRouter::publish`] runs publisher handlers first.

pub use handlers::{ChannelHandler, IntoPayload};
pub use injectable::InjectableMqRouter;
pub use message::Message;
pub use router::MqRouter;

pub(crate) mod handlers;
pub mod injectable;
pub mod message;
pub mod router;
