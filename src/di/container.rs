//! Dependency container and provider storage

use crate::error::Error;
use super::slot::{Slot, SlotKey, SlotKeyHasher};

use std::{
    any::Any,
    collections::HashMap,
    fmt::{self, Debug},
    hash::BuildHasherDefault,
    sync::Arc,
};

/// The concrete callable bound to a slot. Invoked once per request or
/// message to produce the dependency value.
pub type Provider<T> = Arc<
    dyn Fn() -> T
    + Send
    + Sync
>;

type ArcProvider = Arc<
    dyn Any
    + Send
    + Sync
>;

/// Inner map of bound providers, keyed by slot identity.
type ProviderMap = HashMap<
    SlotKey,
    (&'static str, ArcProvider),
    BuildHasherDefault<SlotKeyHasher>
>;

/// Binds the slots declared by a [`SlotSet`](super::SlotSet) to concrete
/// providers. Every declared slot must be bound before [`build`](Self::build)
/// succeeds.
pub struct ContainerBuilder {
    declared: Vec<(SlotKey, &'static str)>,
    providers: ProviderMap,
}

impl ContainerBuilder {
    pub(super) fn new(declared: Vec<(SlotKey, &'static str)>) -> Self {
        Self { declared, providers: ProviderMap::default() }
    }

    /// Binds `slot` to `provider`. Rebinding a slot replaces the previous
    /// provider.
    pub fn bind<T, F>(mut self, slot: Slot<T>, provider: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let provider: Provider<T> = Arc::new(provider);
        self.providers.insert(slot.key(), (slot.name(), Arc::new(provider)));
        self
    }

    /// Builds the container, failing if any declared slot is unbound or any
    /// bound slot was never declared in this layout.
    pub fn build(self) -> Result<Container, Error> {
        for &(key, name) in &self.declared {
            if !self.providers.contains_key(&key) {
                return Err(Error::SlotUnbound(name));
            }
        }
        let foreign = self.providers.iter()
            .find(|(key, _)| !self.declared.iter().any(|(declared, _)| declared == *key))
            .map(|(_, (name, _))| *name);
        if let Some(name) = foreign {
            return Err(Error::SlotMissing(name));
        }

        Ok(Container { providers: Arc::new(self.providers) })
    }
}

impl Debug for ContainerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerBuilder")
            .field("declared", &self.declared.len())
            .field("bound", &self.providers.len())
            .finish()
    }
}

/// An immutable set of bound providers, queried (never mutated) while routers
/// are materialized. Cloning is cheap.
#[derive(Clone)]
pub struct Container {
    providers: Arc<ProviderMap>,
}

impl Container {
    /// Looks up the provider bound to `slot`.
    ///
    /// Fails with [`Error::SlotMissing`] when `slot` belongs to a different
    /// slot set than the one this container was built from.
    pub fn provider<T: Send + Sync + 'static>(&self, slot: Slot<T>) -> Result<Provider<T>, Error> {
        let (_, provider) = self.providers
            .get(&slot.key())
            .ok_or(Error::SlotMissing(slot.name()))?;
        provider
            .downcast_ref::<Provider<T>>()
            .cloned()
            .ok_or(Error::ResolveFailed(slot.name()))
    }

    /// Resolves `slot` by invoking its bound provider once.
    pub fn resolve<T: Send + Sync + 'static>(&self, slot: Slot<T>) -> Result<T, Error> {
        self.provider(slot).map(|provider| provider())
    }
}

impl Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("slots", &self.providers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::di::SlotSet;
    use crate::error::Error;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn it_binds_and_resolves() {
        let mut slots = SlotSet::new();
        let x = slots.declare::<i32>("x");

        let container = slots.builder()
            .bind(x, || 5)
            .build()
            .unwrap();

        assert_eq!(container.resolve(x).unwrap(), 5);
    }

    #[test]
    fn it_invokes_provider_per_resolution() {
        let mut slots = SlotSet::new();
        let counter = slots.declare::<usize>("counter");

        let calls = Arc::new(AtomicUsize::new(0));
        let tracked = calls.clone();
        let container = slots.builder()
            .bind(counter, move || tracked.fetch_add(1, Ordering::SeqCst))
            .build()
            .unwrap();

        assert_eq!(container.resolve(counter).unwrap(), 0);
        assert_eq!(container.resolve(counter).unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn it_fails_to_build_with_unbound_slot() {
        let mut slots = SlotSet::new();
        let _x = slots.declare::<i32>("x");
        let _y = slots.declare::<i32>("y");

        let result = slots.builder().bind(_x, || 1).build();

        assert!(matches!(result, Err(Error::SlotUnbound("y"))));
    }

    #[test]
    fn it_fails_to_build_with_foreign_slot() {
        let mut declared = SlotSet::new();
        let x = declared.declare::<i32>("x");

        let mut other = SlotSet::new();
        let foreign = other.declare::<i32>("x");

        let result = declared.builder()
            .bind(x, || 1)
            .bind(foreign, || 2)
            .build();

        assert!(matches!(result, Err(Error::SlotMissing("x"))));
    }

    #[test]
    fn it_rejects_slots_from_another_container() {
        let mut first = SlotSet::new();
        let bound = first.declare::<i32>("x");
        let container = first.builder().bind(bound, || 1).build().unwrap();

        let mut second = SlotSet::new();
        let unrelated = second.declare::<i32>("x");

        assert!(matches!(container.resolve(unrelated), Err(Error::SlotMissing("x"))));
        assert_eq!(container.resolve(bound).unwrap(), 1);
    }

    #[test]
    fn it_lets_last_binding_win() {
        let mut slots = SlotSet::new();
        let x = slots.declare::<i32>("x");

        let container = slots.builder()
            .bind(x, || 1)
            .bind(x, || 2)
            .build()
            .unwrap();

        assert_eq!(container.resolve(x).unwrap(), 2);
    }

    #[test]
    fn it_shares_providers_across_clones() {
        let mut slots = SlotSet::new();
        let x = slots.declare::<String>("x");

        let container = slots.builder()
            .bind(x, || "shared".to_string())
            .build()
            .unwrap();

        let clone = container.clone();
        assert_eq!(clone.resolve(x).unwrap(), "shared");
    }
}
