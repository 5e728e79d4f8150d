//! Service lifetime definitions.

/// Service lifetimes controlling instance caching behavior
///
/// Defines how instances produced for a service name are cached and shared
/// within one container. A shared service is built once and kept in the
/// instance cache for the container's lifetime; a transient service is
/// rebuilt on every request and never touches the cache.
///
/// # Examples
///
/// ```rust
/// use wirebox::{Container, Resolver};
/// use std::sync::Arc;
///
/// struct Clock;
///
/// let container = Container::new();
///
/// // Shared: one instance for the whole container
/// container.register_shared("clock", |_| Clock);
///
/// // Transient: a new instance per request
/// container.register_transient("stopwatch", |_| Clock);
///
/// let a = container.get_as::<Clock>("clock").unwrap();
/// let b = container.get_as::<Clock>("clock").unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
///
/// let c = container.get_as::<Clock>("stopwatch").unwrap();
/// let d = container.get_as::<Clock>("stopwatch").unwrap();
/// assert!(!Arc::ptr_eq(&c, &d));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Single instance per container, cached until teardown or re-registration
    ///
    /// Shared services are created on first request and then returned by
    /// identity for every subsequent request for the same name. Re-registering
    /// the name invalidates the cached instance so the new definition takes
    /// effect.
    Shared,
    /// New instance per resolution, never cached
    ///
    /// Transient services invoke their producer on every request, even when
    /// the resulting values are structurally equal.
    Transient,
}
