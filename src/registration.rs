//! Service definitions and the definition store.

use std::fmt;
use std::sync::Arc;

use crate::blueprint::{AnyArc, Blueprint, Constructible};
use crate::container::ResolverContext;
use crate::error::WireResult;
use crate::internal::Map;
use crate::lifetime::Lifetime;

/// Factory closure stored in a [`Producer::Factory`] registration.
///
/// Factories receive the resolver context so they can pull nested
/// dependencies through the same resolution chain (and the same cycle
/// detection) as auto-wired constructors.
pub type FactoryFn =
    Arc<dyn for<'a> Fn(&ResolverContext<'a>) -> WireResult<AnyArc> + Send + Sync>;

/// How to produce an instance for a service name.
///
/// A tagged three-case union, so the container's production dispatch is an
/// exhaustive match rather than runtime type sniffing.
#[derive(Clone)]
pub enum Producer {
    /// A pre-built value, returned as-is.
    Instance(AnyArc),
    /// An opaque factory closure.
    Factory(FactoryFn),
    /// A constructible type, built by walking its blueprint.
    Type(Blueprint),
}

impl Producer {
    /// Wraps a pre-built value.
    pub fn instance<T: Send + Sync + 'static>(value: T) -> Producer {
        Producer::Instance(Arc::new(value))
    }

    /// Wraps an infallible factory. Panics inside the factory propagate
    /// unchanged to the caller.
    pub fn factory<T, F>(factory: F) -> Producer
    where
        T: Send + Sync + 'static,
        F: for<'a> Fn(&ResolverContext<'a>) -> T + Send + Sync + 'static,
    {
        Producer::Factory(Arc::new(move |ctx| Ok(Arc::new(factory(ctx)) as AnyArc)))
    }

    /// Wraps a fallible factory. Errors surface unchanged through
    /// resolution; wrap foreign error types with
    /// [`WireError::construction`](crate::WireError::construction).
    pub fn try_factory<T, F>(factory: F) -> Producer
    where
        T: Send + Sync + 'static,
        F: for<'a> Fn(&ResolverContext<'a>) -> WireResult<T> + Send + Sync + 'static,
    {
        Producer::Factory(Arc::new(move |ctx| {
            factory(ctx).map(|value| Arc::new(value) as AnyArc)
        }))
    }

    /// Uses a [`Constructible`] type's own blueprint.
    pub fn of_type<T: Constructible>() -> Producer {
        Producer::Type(T::blueprint())
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Producer::Instance(_) => "instance",
            Producer::Factory(_) => "factory",
            Producer::Type(_) => "type",
        }
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Producer::Instance(_) => f.write_str("Producer::Instance"),
            Producer::Factory(_) => f.write_str("Producer::Factory"),
            Producer::Type(blueprint) => f
                .debug_tuple("Producer::Type")
                .field(&blueprint.service())
                .finish(),
        }
    }
}

/// One registered service: how to produce it and how long instances live.
///
/// Definitions are immutable once stored; re-registering a name replaces the
/// whole definition (and invalidates any cached instance, see
/// [`Container::register`](crate::Container::register)).
#[derive(Clone, Debug)]
pub struct ServiceDefinition {
    producer: Producer,
    lifetime: Lifetime,
}

impl ServiceDefinition {
    /// Creates a definition. The producer is not validated here; validation
    /// is lazy, on first build.
    pub fn new(producer: Producer, lifetime: Lifetime) -> Self {
        Self { producer, lifetime }
    }

    /// The instance lifetime policy.
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// The production strategy.
    pub fn producer(&self) -> &Producer {
        &self.producer
    }
}

/// Name-keyed store of service definitions. The single source of truth for
/// what `get` may resolve at top level.
pub(crate) struct Store {
    definitions: Map<String, ServiceDefinition>,
}

impl Store {
    pub(crate) fn new() -> Self {
        Self {
            definitions: Map::default(),
        }
    }

    /// Stores or overwrites the definition for `name`.
    pub(crate) fn insert(&mut self, name: String, definition: ServiceDefinition) {
        self.definitions.insert(name, definition);
    }

    /// Pure read.
    pub(crate) fn lookup(&self, name: &str) -> Option<&ServiceDefinition> {
        self.definitions.get(name)
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &ServiceDefinition)> {
        self.definitions
            .iter()
            .map(|(name, definition)| (name.as_str(), definition))
    }

    pub(crate) fn len(&self) -> usize {
        self.definitions.len()
    }
}
