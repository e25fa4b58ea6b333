//! Slot declaration tools

use std::{
    fmt::{self, Debug},
    hash::Hasher,
    marker::PhantomData,
    sync::atomic::{AtomicU64, Ordering},
};

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a declared slot.
///
/// Slots are matched by key, never by name, so two slots with the same name
/// declared in different slot sets are never confused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlotKey(u64);

impl SlotKey {
    fn next() -> Self {
        Self(NEXT_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

/// A named, typed placeholder for a dependency provider.
///
/// Created by [`SlotSet::declare`]; bound to a concrete provider through
/// [`ContainerBuilder::bind`](super::ContainerBuilder::bind).
pub struct Slot<T> {
    key: SlotKey,
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Slot<T> {
    /// The name this slot was declared under.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn key(&self) -> SlotKey {
        self.key
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slot<T> {}

impl<T> Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("name", &self.name)
            .field("key", &self.key)
            .finish()
    }
}

/// Declares the slot layout of a container.
///
/// One `declare` call per dependency; the resulting [`Slot`]s are later used
/// both to bind providers and to mark deferred handler arguments.
///
/// # Example
/// ```
/// use latewire::di::SlotSet;
///
/// let mut slots = SlotSet::new();
/// let answer = slots.declare::<i32>("answer");
///
/// let container = slots.builder()
///     .bind(answer, || 42)
///     .build()
///     .unwrap();
///
/// assert_eq!(container.resolve(answer).unwrap(), 42);
/// ```
#[derive(Debug, Default)]
pub struct SlotSet {
    declared: Vec<(SlotKey, &'static str)>,
}

impl SlotSet {
    /// Creates an empty slot set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a slot named `name` holding providers of `T`.
    pub fn declare<T: Send + Sync + 'static>(&mut self, name: &'static str) -> Slot<T> {
        let key = SlotKey::next();
        self.declared.push((key, name));
        Slot { key, name, _marker: PhantomData }
    }

    /// Starts the binding stage for this layout.
    pub fn builder(&self) -> super::ContainerBuilder {
        super::ContainerBuilder::new(self.declared.clone())
    }

    /// Number of declared slots.
    pub fn len(&self) -> usize {
        self.declared.len()
    }

    /// Whether no slots have been declared.
    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }
}

/// Slot keys are already unique `u64`s, no hashing required.
#[derive(Default)]
pub(crate) struct SlotKeyHasher(u64);

impl Hasher for SlotKeyHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    #[cold]
    fn write(&mut self, _: &[u8]) {
        unreachable!("SlotKey calls write_u64");
    }

    #[inline]
    fn write_u64(&mut self, key: u64) {
        self.0 = key;
    }
}
