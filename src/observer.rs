//! Diagnostic observers for resolution traceability.
//!
//! Hooks for observing top-level resolutions: what was asked for, how long
//! the build took, and how it failed. Useful for debugging wiring problems
//! and for feeding resolution timings into whatever telemetry the host
//! application runs.

use std::sync::Arc;
use std::time::Duration;

use crate::error::WireError;
use crate::internal::sync::RwLock;

/// Observer of container resolution events.
///
/// Observer calls are made synchronously during resolution; keep
/// implementations lightweight. All methods default to no-ops so an
/// observer only implements the events it cares about.
///
/// # Examples
///
/// ```
/// use wirebox::{Container, ContainerObserver};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct CountingObserver {
///     resolutions: AtomicUsize,
/// }
///
/// impl ContainerObserver for CountingObserver {
///     fn resolved(&self, _name: &str, _duration: Duration) {
///         self.resolutions.fetch_add(1, Ordering::SeqCst);
///     }
/// }
///
/// let observer = Arc::new(CountingObserver::default());
/// let container = Container::new();
/// container.add_observer(observer.clone());
///
/// container.register_instance("port", 8080u16);
/// let _ = container.get("port").unwrap();
/// assert_eq!(observer.resolutions.load(Ordering::SeqCst), 1);
/// ```
pub trait ContainerObserver: Send + Sync {
    /// A top-level resolution is starting.
    fn resolving(&self, _name: &str) {}

    /// A top-level resolution succeeded.
    fn resolved(&self, _name: &str, _duration: Duration) {}

    /// A top-level resolution failed.
    fn failed(&self, _name: &str, _error: &WireError) {}
}

/// Built-in observer that logs events to stdout/stderr.
///
/// A simple implementation useful for development. For production use,
/// implement a custom observer that integrates with the application's
/// logging infrastructure.
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    /// Creates a logging observer with the default prefix.
    pub fn new() -> Self {
        Self {
            prefix: "[wirebox]".to_string(),
        }
    }

    /// Creates a logging observer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerObserver for LoggingObserver {
    fn resolving(&self, name: &str) {
        println!("{} Resolving: {}", self.prefix, name);
    }

    fn resolved(&self, name: &str, duration: Duration) {
        println!("{} Resolved: {} in {:?}", self.prefix, name, duration);
    }

    fn failed(&self, name: &str, error: &WireError) {
        eprintln!("{} FAILED {}: {}", self.prefix, name, error);
    }
}

/// Registered observers, fanned out to on every top-level resolution.
pub(crate) struct Observers {
    list: RwLock<Vec<Arc<dyn ContainerObserver>>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self {
            list: RwLock::new(Vec::new()),
        }
    }

    pub(crate) fn add(&self, observer: Arc<dyn ContainerObserver>) {
        self.list.write().push(observer);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.list.read().is_empty()
    }

    // Notification clones the list out of the lock first: an observer may
    // itself resolve services, and re-entering the lock mid-notification
    // must not deadlock against a concurrent `add`.
    fn snapshot(&self) -> Vec<Arc<dyn ContainerObserver>> {
        self.list.read().clone()
    }

    pub(crate) fn resolving(&self, name: &str) {
        for observer in self.snapshot() {
            observer.resolving(name);
        }
    }

    pub(crate) fn resolved(&self, name: &str, duration: Duration) {
        for observer in self.snapshot() {
            observer.resolved(name, duration);
        }
    }

    pub(crate) fn failed(&self, name: &str, error: &WireError) {
        for observer in self.snapshot() {
            observer.failed(name, error);
        }
    }
}
