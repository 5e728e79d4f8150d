//! Resolver context handed to factory closures.

use crate::blueprint::AnyArc;
use crate::container::Container;
use crate::error::WireResult;
use crate::traits::Resolve;

/// Context passed to factory closures for resolving nested dependencies.
///
/// Everything resolved through the context flows through the owning
/// container's resolution chain, so shared instances, overrides, and cycle
/// detection behave exactly as they do for auto-wired constructor
/// parameters.
///
/// # Examples
///
/// ```
/// use wirebox::{Container, Resolver};
/// use std::sync::Arc;
///
/// struct Database {
///     url: String,
/// }
/// struct UserService {
///     db: Arc<Database>,
/// }
///
/// let container = Container::new();
/// container.register_instance("database", Database {
///     url: "postgres://localhost".to_string(),
/// });
/// container.register_transient("users", |ctx| UserService {
///     db: ctx.get_required::<Database>("database"),
/// });
///
/// let users = container.get_as::<UserService>("users").unwrap();
/// assert_eq!(users.db.url, "postgres://localhost");
/// ```
pub struct ResolverContext<'a> {
    container: &'a Container,
}

impl<'a> ResolverContext<'a> {
    pub(crate) fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Resolves a service by name. Equivalent to [`Container::get`] on the
    /// owning container.
    pub fn get(&self, name: &str) -> WireResult<AnyArc> {
        self.container.get(name)
    }

    /// The owning container, for factories that need more than resolution
    /// (e.g. inspecting registrations).
    pub fn container(&self) -> &Container {
        self.container
    }
}

impl Resolve for ResolverContext<'_> {
    fn resolve(&self, name: &str) -> WireResult<AnyArc> {
        self.container.get(name)
    }

    fn contains(&self, name: &str) -> bool {
        self.container.contains(name)
    }

    fn push_disposer(&self, f: Box<dyn FnOnce() + Send>) {
        self.container.push_disposer(f);
    }
}
