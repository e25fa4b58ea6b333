//! Deferred argument declarations and the binding transformation

use crate::error::Error;
use super::{Container, Provider, Slot};

use std::fmt::{self, Debug};

/// A handler argument declared up front: either a literal value carried
/// through unchanged, or a deferred reference to a container slot.
#[derive(Clone)]
pub enum Arg<T> {
    /// A concrete value supplied at declaration time.
    Value(T),
    /// A reference to a slot, resolved when the router is materialized.
    Slot(Slot<T>),
}

impl<T: Debug> Debug for Arg<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Arg::Slot(slot) => f.debug_tuple("Slot").field(&slot.name()).finish(),
        }
    }
}

/// An argument after container binding: literals stay as-is, slot references
/// hold the bound provider. Produced by [`BindArgs::bind`]; never mutates the
/// declaration it was built from.
pub enum Bound<T> {
    /// A literal that passed through binding untouched.
    Value(T),
    /// The provider resolved from the container.
    Provider(Provider<T>),
}

impl<T: Clone> Bound<T> {
    /// Produces a fresh argument value: clones the literal or invokes the
    /// provider.
    pub fn produce(&self) -> T {
        match self {
            Bound::Value(value) => value.clone(),
            Bound::Provider(provider) => provider(),
        }
    }

    /// Whether this argument is backed by a provider.
    pub fn is_provider(&self) -> bool {
        matches!(self, Bound::Provider(_))
    }
}

impl<T: Clone> Clone for Bound<T> {
    fn clone(&self) -> Self {
        match self {
            Bound::Value(value) => Bound::Value(value.clone()),
            Bound::Provider(provider) => Bound::Provider(provider.clone()),
        }
    }
}

/// Binds a single argument declaration against a container.
pub trait BindArg {
    /// The post-binding form of this argument.
    type Bound;

    /// Resolves a deferred slot reference into its bound provider; literals
    /// pass through unchanged.
    fn bind(self, container: &Container) -> Result<Self::Bound, Error>;
}

impl<T: Clone + Send + Sync + 'static> BindArg for Arg<T> {
    type Bound = Bound<T>;

    fn bind(self, container: &Container) -> Result<Self::Bound, Error> {
        match self {
            Arg::Value(value) => Ok(Bound::Value(value)),
            Arg::Slot(slot) => container.provider(slot).map(Bound::Provider),
        }
    }
}

/// Already-bound arguments are never re-matched; binding is idempotent.
impl<T> BindArg for Bound<T> {
    type Bound = Bound<T>;

    fn bind(self, _: &Container) -> Result<Self::Bound, Error> {
        Ok(self)
    }
}

/// The injection operation over a whole argument list: resolves every
/// deferred slot reference in a tuple of [`Arg`]s, yielding a bound tuple
/// ready to feed a handler.
pub trait BindArgs {
    /// The post-binding argument list.
    type Bound: ProduceArgs;

    /// Binds every argument against `container`.
    fn bind(self, container: &Container) -> Result<Self::Bound, Error>;
}

/// Turns a bound argument list into a tuple of values at call time.
pub trait ProduceArgs: Send + Sync + 'static {
    /// The values handed to the handler.
    type Values: Send + 'static;

    /// Produces one fresh value per argument.
    fn produce(&self) -> Self::Values;
}

impl BindArgs for () {
    type Bound = ();

    fn bind(self, _: &Container) -> Result<Self::Bound, Error> {
        Ok(())
    }
}

impl ProduceArgs for () {
    type Values = ();

    fn produce(&self) -> Self::Values {}
}

macro_rules! define_bind_args ({ $($param:ident)+ } => {
    impl<$($param: BindArg),+> BindArgs for ($($param,)+)
    where
        ($($param::Bound,)+): ProduceArgs
    {
        type Bound = ($($param::Bound,)+);

        #[allow(non_snake_case)]
        fn bind(self, container: &Container) -> Result<Self::Bound, Error> {
            let ($($param,)+) = self;
            Ok(($($param.bind(container)?,)+))
        }
    }
});

macro_rules! define_produce_args ({ $($param:ident)+ } => {
    impl<$($param: Clone + Send + Sync + 'static),+> ProduceArgs for ($(Bound<$param>,)+) {
        type Values = ($($param,)+);

        #[allow(non_snake_case)]
        fn produce(&self) -> Self::Values {
            let ($($param,)+) = self;
            ($($param.produce(),)+)
        }
    }
});

define_bind_args! { T1 }
define_bind_args! { T1 T2 }
define_bind_args! { T1 T2 T3 }
define_bind_args! { T1 T2 T3 T4 }
define_bind_args! { T1 T2 T3 T4 T5 }

define_produce_args! { T1 }
define_produce_args! { T1 T2 }
define_produce_args! { T1 T2 T3 }
define_produce_args! { T1 T2 T3 T4 }
define_produce_args! { T1 T2 T3 T4 T5 }
