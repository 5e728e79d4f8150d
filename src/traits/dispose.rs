//! Disposal trait for resource cleanup.

/// Trait for resource disposal at container teardown.
///
/// Implement this for services that need structured cleanup (flushing
/// buffers, closing handles). Hooks registered through
/// [`Resolver::register_disposer`](crate::Resolver::register_disposer) run
/// in LIFO order when [`Container::teardown`](crate::Container::teardown) is
/// called.
///
/// # Examples
///
/// ```
/// use wirebox::{Container, Dispose, Resolver};
/// use std::sync::Arc;
///
/// struct AuditLog;
///
/// impl Dispose for AuditLog {
///     fn dispose(&self) {
///         // flush pending entries
///     }
/// }
///
/// let container = Container::new();
/// container.register_shared("audit", |ctx| {
///     let log = Arc::new(AuditLog);
///     ctx.register_disposer(log.clone());
///     AuditLog
/// });
/// # let _ = container.get("audit").unwrap();
/// container.teardown();
/// ```
pub trait Dispose: Send + Sync + 'static {
    /// Perform cleanup of resources.
    fn dispose(&self);
}
