//! Resolver traits: the seam shared by the container and factory contexts.

use std::any::type_name;
use std::sync::Arc;

use crate::blueprint::AnyArc;
use crate::error::{WireError, WireResult};
use crate::traits::Dispose;

/// Object-safe resolution core.
///
/// Implemented by [`Container`](crate::Container) and by the
/// [`ResolverContext`](crate::ResolverContext) handed to factories, so
/// application code and factories resolve through one interface.
pub trait Resolve: Send + Sync {
    /// Resolves a service by name, type-erased.
    fn resolve(&self, name: &str) -> WireResult<AnyArc>;

    /// Whether a definition exists for `name`. No instance is built.
    fn contains(&self, name: &str) -> bool;

    /// Registers a teardown hook, run LIFO on container teardown.
    fn push_disposer(&self, f: Box<dyn FnOnce() + Send>);
}

/// Typed helpers layered over [`Resolve`].
///
/// Blanket-implemented for every resolver, so `use wirebox::Resolver` is all
/// a call site needs.
///
/// # Examples
///
/// ```
/// use wirebox::{Container, Resolver};
///
/// struct Greeter {
///     greeting: String,
/// }
///
/// let container = Container::new();
/// container.register_shared("greeter", |_| Greeter {
///     greeting: "hello".to_string(),
/// });
///
/// let greeter = container.get_as::<Greeter>("greeter").unwrap();
/// assert_eq!(greeter.greeting, "hello");
/// ```
pub trait Resolver: Resolve {
    /// Resolves `name` and downcasts to `T`.
    ///
    /// Fails with [`WireError::TypeMismatch`] when the registered instance
    /// is some other type.
    fn get_as<T: Send + Sync + 'static>(&self, name: &str) -> WireResult<Arc<T>> {
        let any = self.resolve(name)?;
        any.downcast::<T>().map_err(|_| WireError::TypeMismatch {
            service: name.to_string(),
            expected: type_name::<T>(),
        })
    }

    /// Resolves `name` as `T`, panicking on failure.
    ///
    /// Use when the registration is part of application wiring and absence
    /// is a programming error worth failing fast on.
    fn get_required<T: Send + Sync + 'static>(&self, name: &str) -> Arc<T> {
        self.get_as::<T>(name)
            .unwrap_or_else(|e| panic!("Failed to resolve `{}`: {}", name, e))
    }

    /// Registers a service for disposal at container teardown.
    ///
    /// Typically called from factories, on the instance they are about to
    /// return.
    fn register_disposer<T: Dispose>(&self, service: Arc<T>) {
        self.push_disposer(Box::new(move || service.dispose()));
    }
}

impl<R: Resolve + ?Sized> Resolver for R {}
