//! The container facade.
//!
//! This module contains the [`Container`] type orchestrating the definition
//! store, the instance cache, and the auto-wiring resolver, plus the
//! [`ResolverContext`] seam handed to factory closures.

use std::sync::Arc;
use std::time::Instant;

use crate::autowire;
use crate::blueprint::{AnyArc, Constructible};
use crate::cache::InstanceCache;
use crate::error::{WireError, WireResult};
use crate::internal::sync::{Mutex, RwLock};
use crate::internal::{DisposeBag, Frame};
use crate::lifetime::Lifetime;
use crate::observer::{ContainerObserver, Observers};
use crate::registration::{Producer, ServiceDefinition, Store};

pub mod context;
pub use context::ResolverContext;

/// Name-keyed service container with auto-wiring.
///
/// The container is the single facade over registration and resolution:
/// `register` writes a [`ServiceDefinition`] into the store, `get` resolves
/// a name by checking the shared-instance cache, invoking the definition's
/// producer (pre-built instance, factory closure, or constructor blueprint),
/// and caching the result for shared lifetimes.
///
/// # Thread safety
///
/// A container can be shared across threads (it is `Arc`-backed and cheap to
/// clone). The store and cache guard their read-modify-write sequences with
/// internal locks, and no lock is held while a factory or constructor runs.
/// Two threads racing to build the same shared service may both construct;
/// the cache keeps one winner, so callers always converge on a single
/// identity. The resolution stack used for cycle detection is thread-local,
/// one per in-flight call chain.
///
/// # Examples
///
/// ```
/// use wirebox::{Container, Resolver};
/// use std::sync::Arc;
///
/// struct Database {
///     connection_string: String,
/// }
///
/// struct UserService {
///     db: Arc<Database>,
/// }
///
/// let container = Container::new();
/// container.register_instance("database", Database {
///     connection_string: "postgres://localhost".to_string(),
/// });
/// container.register_transient("users", |ctx| UserService {
///     db: ctx.get_required::<Database>("database"),
/// });
///
/// let users = container.get_as::<UserService>("users").unwrap();
/// assert_eq!(users.db.connection_string, "postgres://localhost");
/// ```
pub struct Container {
    inner: Arc<ContainerInner>,
}

pub(crate) struct ContainerInner {
    store: RwLock<Store>,
    cache: InstanceCache,
    observers: Observers,
    disposers: Mutex<DisposeBag>,
}

impl Container {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                store: RwLock::new(Store::new()),
                cache: InstanceCache::new(),
                observers: Observers::new(),
                disposers: Mutex::new(DisposeBag::default()),
            }),
        }
    }

    // ----- Registration -----

    /// Stores or overwrites the definition for `name`.
    ///
    /// The producer is not validated here; validation happens lazily on the
    /// first build. If a shared instance was already cached for `name`, it
    /// is invalidated so the new definition takes effect on the next `get`.
    ///
    /// Re-registering a name while another thread is mid-`get` on that same
    /// name should be externally serialized; the container keeps its own
    /// state coherent either way, but which producer that in-flight `get`
    /// observes is then up to timing.
    pub fn register(&self, name: impl Into<String>, producer: Producer, lifetime: Lifetime) {
        let name = name.into();
        self.inner
            .store
            .write()
            .insert(name.clone(), ServiceDefinition::new(producer, lifetime));
        self.inner.cache.invalidate(&name);
    }

    /// Registers a pre-built instance. Pre-built instances are shared by
    /// construction: every `get` returns the same value.
    pub fn register_instance<T: Send + Sync + 'static>(&self, name: impl Into<String>, value: T) {
        self.register(name, Producer::instance(value), Lifetime::Shared);
    }

    /// Registers a shared factory: invoked once, the result is cached and
    /// returned by identity afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use wirebox::{Container, Resolver};
    /// use std::sync::Arc;
    ///
    /// struct Logger;
    ///
    /// let container = Container::new();
    /// container.register_shared("logger", |_| Logger);
    ///
    /// let a = container.get_as::<Logger>("logger").unwrap();
    /// let b = container.get_as::<Logger>("logger").unwrap();
    /// assert!(Arc::ptr_eq(&a, &b));
    /// ```
    pub fn register_shared<T, F>(&self, name: impl Into<String>, factory: F)
    where
        T: Send + Sync + 'static,
        F: for<'a> Fn(&ResolverContext<'a>) -> T + Send + Sync + 'static,
    {
        self.register(name, Producer::factory(factory), Lifetime::Shared);
    }

    /// Registers a transient factory: invoked on every `get`, never cached.
    pub fn register_transient<T, F>(&self, name: impl Into<String>, factory: F)
    where
        T: Send + Sync + 'static,
        F: for<'a> Fn(&ResolverContext<'a>) -> T + Send + Sync + 'static,
    {
        self.register(name, Producer::factory(factory), Lifetime::Transient);
    }

    /// Fallible variant of [`register_shared`](Self::register_shared).
    pub fn try_register_shared<T, F>(&self, name: impl Into<String>, factory: F)
    where
        T: Send + Sync + 'static,
        F: for<'a> Fn(&ResolverContext<'a>) -> WireResult<T> + Send + Sync + 'static,
    {
        self.register(name, Producer::try_factory(factory), Lifetime::Shared);
    }

    /// Fallible variant of [`register_transient`](Self::register_transient).
    pub fn try_register_transient<T, F>(&self, name: impl Into<String>, factory: F)
    where
        T: Send + Sync + 'static,
        F: for<'a> Fn(&ResolverContext<'a>) -> WireResult<T> + Send + Sync + 'static,
    {
        self.register(name, Producer::try_factory(factory), Lifetime::Transient);
    }

    /// Registers a [`Constructible`] type under its own service name, built
    /// from its blueprint.
    ///
    /// # Examples
    ///
    /// ```
    /// use wirebox::{Blueprint, Constructible, Container, Lifetime};
    ///
    /// struct Clock;
    ///
    /// impl Constructible for Clock {
    ///     fn service_name() -> &'static str {
    ///         "Clock"
    ///     }
    ///     fn blueprint() -> Blueprint {
    ///         Blueprint::for_type::<Clock>(Self::service_name()).construct_with(|_| Ok(Clock))
    ///     }
    /// }
    ///
    /// let container = Container::new();
    /// container.register_type::<Clock>(Lifetime::Shared);
    /// assert!(container.get("Clock").is_ok());
    /// ```
    pub fn register_type<T: Constructible>(&self, lifetime: Lifetime) {
        self.register(T::service_name(), Producer::of_type::<T>(), lifetime);
    }

    /// Whether a definition exists for `name`. No instance is built.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.store.read().contains(name)
    }

    // ----- Resolution -----

    /// Resolves `name` to a type-erased instance.
    ///
    /// The resolution sequence is: store lookup (failing with
    /// [`WireError::NotFound`] for unregistered names; `get` never
    /// registers anything implicitly), cache check for shared lifetimes,
    /// producer invocation, cache store for shared lifetimes. All recursive
    /// builds complete before this call returns.
    pub fn get(&self, name: &str) -> WireResult<AnyArc> {
        if self.inner.observers.is_empty() {
            return self.resolve_named(name);
        }

        self.inner.observers.resolving(name);
        let start = Instant::now();
        let result = self.resolve_named(name);
        match &result {
            Ok(_) => self.inner.observers.resolved(name, start.elapsed()),
            Err(error) => self.inner.observers.failed(name, error),
        }
        result
    }

    pub(crate) fn resolve_named(&self, name: &str) -> WireResult<AnyArc> {
        // One frame per named resolution; the guard pops on every exit path,
        // so a failed build never leaves `name` marked mid-construction.
        let _frame = Frame::enter(name)?;

        // Clone the definition out of the store so no lock is held while the
        // producer runs.
        let definition = match self.inner.store.read().lookup(name) {
            Some(definition) => definition.clone(),
            None => return Err(WireError::NotFound(name.to_string())),
        };

        if definition.lifetime() == Lifetime::Shared {
            if let Some(cached) = self.inner.cache.get(name) {
                return Ok(cached);
            }
        }

        let value = match definition.producer() {
            Producer::Instance(value) => value.clone(),
            Producer::Factory(factory) => {
                let ctx = ResolverContext::new(self);
                factory(&ctx)?
            }
            Producer::Type(blueprint) => autowire::construct(blueprint, self)?,
        };

        if definition.lifetime() == Lifetime::Shared {
            // Double-checked store: a concurrent build of the same name may
            // have cached first; that instance wins.
            return Ok(self.inner.cache.put(name, value));
        }
        Ok(value)
    }

    // ----- Lifecycle -----

    /// Tears the container down: runs disposal hooks in LIFO order, then
    /// clears the shared-instance cache.
    ///
    /// Definitions survive teardown; shared services are rebuilt on their
    /// next `get`.
    pub fn teardown(&self) {
        self.inner.disposers.lock().run_all_reverse();
        self.inner.cache.clear();
    }

    /// Attaches an observer notified of every top-level resolution.
    pub fn add_observer(&self, observer: Arc<dyn ContainerObserver>) {
        self.inner.observers.add(observer);
    }

    pub(crate) fn push_disposer(&self, f: Box<dyn FnOnce() + Send>) {
        self.inner.disposers.lock().push(f);
    }

    pub(crate) fn snapshot_definitions(&self) -> Vec<(String, ServiceDefinition)> {
        self.inner
            .store
            .read()
            .iter()
            .map(|(name, definition)| (name.to_string(), definition.clone()))
            .collect()
    }

    #[cfg(feature = "graph-export")]
    pub(crate) fn is_cached(&self, name: &str) -> bool {
        self.inner.cache.contains(name)
    }

    #[cfg(feature = "diagnostics")]
    pub fn debug_dump(&self) -> String {
        let mut s = String::new();
        s.push_str("=== Container Debug ===\n");
        for (name, definition) in self.snapshot_definitions() {
            s.push_str(&format!(
                "  {}: {:?} ({})\n",
                name,
                definition.lifetime(),
                definition.producer().kind()
            ));
        }
        s
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Container {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl Drop for Container {
    fn drop(&mut self) {
        if Arc::strong_count(&self.inner) == 1 {
            let bag = self.inner.disposers.lock();
            if !bag.is_empty() {
                eprintln!(
                    "[wirebox] Container dropped with undisposed resources. Call teardown() before dropping."
                );
            }
        }
    }
}

impl crate::traits::Resolve for Container {
    fn resolve(&self, name: &str) -> WireResult<AnyArc> {
        self.get(name)
    }

    fn contains(&self, name: &str) -> bool {
        Container::contains(self, name)
    }

    fn push_disposer(&self, f: Box<dyn FnOnce() + Send>) {
        Container::push_disposer(self, f);
    }
}
