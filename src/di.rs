//! Dependency slots, container and argument binding
//!
//! Wiring happens in two stages. A [`SlotSet`] declares the named, typed
//! dependency slots a container will carry; a [`ContainerBuilder`] then binds
//! each slot to a concrete provider and produces an immutable [`Container`].
//! Route handlers refer to slots through [`Arg::Slot`] declarations that are
//! resolved against a container only when a router is materialized.

pub use self::{
    bind::{Arg, BindArg, BindArgs, Bound, ProduceArgs},
    container::{Container, ContainerBuilder, Provider},
    slot::{Slot, SlotSet},
};

pub mod bind;
pub mod container;
pub mod slot;
