//! # latewire
//! Dependency injection for handlers whose infrastructure arrives late.
//!
//! Routes are declared up front against named slots; providers are bound
//! afterwards, and [`create_router`](http::InjectableRouter::create_router)
//! materializes a real routing table once a [`Container`] exists.
//!
//! ## Features
//! * `http` - HTTP routing and the server loop (enabled by default)
//! * `mq` - message-queue channel routing (enabled by default)
//! * `tracing` - emits [tracing](https://crates.io/crates/tracing) events
//!
//! # Example
//! ```no_run
//! use latewire::{App, Json, di::{Arg, SlotSet}, http::InjectableRouter};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let mut slots = SlotSet::new();
//!     let answer = slots.declare::<i32>("answer");
//!
//!     // routes are recorded before any provider exists
//!     let mut routes = InjectableRouter::with_prefix("/api");
//!     routes.get("/answer", |n: i32| async move { Json(n) }, (Arg::Slot(answer),));
//!
//!     let container = slots.builder().bind(answer, || 42).build()?;
//!     let router = routes.create_router(&container)?;
//!
//!     let mut app = App::new().bind("127.0.0.1:7878");
//!     app.include(router);
//!     app.run().await
//! }
//! ```
#![forbid(unsafe_code)]
#![deny(unreachable_pub)]

pub mod di;
pub mod error;
#[cfg(feature = "http")]
pub mod app;
#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "mq")]
pub mod mq;
#[cfg(feature = "http")]
mod server;

pub use crate::di::{Arg, Bound, Container, ContainerBuilder, Slot, SlotSet};
pub use crate::error::Error;

#[cfg(feature = "http")]
pub use crate::{
    app::{App, Connection},
    http::{InjectableRouter, Router},
};

#[cfg(feature = "mq")]
pub use crate::mq::{InjectableMqRouter, Message, MqRouter};

/// Wraps a value that is serialized as JSON on the way out of a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Unwraps the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}
