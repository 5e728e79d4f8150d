//! # wirebox
//!
//! Name-keyed auto-wiring service container for Rust, in the spirit of the
//! classic reflective IoC containers.
//!
//! ## Features
//!
//! - **Name-keyed registrations**: services are registered and resolved by
//!   string name, so wiring can be rearranged (and overridden) at runtime
//! - **Three producer kinds**: pre-built instances, factory closures, and
//!   constructor blueprints, dispatched as an exhaustive match
//! - **Auto-wiring**: constructor blueprints declare their parameters;
//!   the resolver satisfies each one recursively, honoring defaults and
//!   optional parameters
//! - **Shared and transient lifetimes**: shared services are built once and
//!   returned by identity; transients are rebuilt on every request
//! - **Circular dependency detection**: eager, with the full chain in the
//!   error, never a stack overflow
//! - **Override-friendly**: re-registering a name invalidates its cached
//!   instance, so test doubles can replace live wiring at any point
//!
//! ## Quick Start
//!
//! ```rust
//! use wirebox::{Container, Resolver};
//! use std::sync::Arc;
//!
//! // Define your services
//! struct Database {
//!     connection_string: String,
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//! }
//!
//! // Register services
//! let container = Container::new();
//! container.register_instance("database", Database {
//!     connection_string: "postgres://localhost".to_string(),
//! });
//! container.register_transient("users", |ctx| UserService {
//!     db: ctx.get_required::<Database>("database"),
//! });
//!
//! // Resolve
//! let users = container.get_as::<UserService>("users").unwrap();
//! assert_eq!(users.db.connection_string, "postgres://localhost");
//! ```
//!
//! ## Auto-wiring
//!
//! Rust has no runtime constructor reflection, so constructible types
//! publish an explicit [`Blueprint`] instead: the same wiring data a
//! reflective container would read from metadata, checked at compile time:
//!
//! ```rust
//! use wirebox::{Blueprint, Constructible, Container, Lifetime, Param, Resolver};
//! use std::sync::Arc;
//!
//! struct Logger;
//!
//! impl Constructible for Logger {
//!     fn service_name() -> &'static str {
//!         "Logger"
//!     }
//!     fn blueprint() -> Blueprint {
//!         Blueprint::for_type::<Logger>(Self::service_name()).construct_with(|_| Ok(Logger))
//!     }
//! }
//!
//! struct Repository {
//!     logger: Arc<Logger>,
//!     timeout: u64,
//! }
//!
//! impl Constructible for Repository {
//!     fn service_name() -> &'static str {
//!         "Repository"
//!     }
//!     fn blueprint() -> Blueprint {
//!         Blueprint::for_type::<Repository>(Self::service_name())
//!             .param(Param::service::<Logger>("logger"))
//!             .param(Param::value::<u64>("timeout").with_default(30u64))
//!             .construct_with(|mut args| {
//!                 Ok(Repository {
//!                     logger: args.take::<Logger>("logger")?,
//!                     timeout: args.value::<u64>("timeout")?,
//!                 })
//!             })
//!     }
//! }
//!
//! let container = Container::new();
//! container.register_type::<Logger>(Lifetime::Shared);
//! container.register_type::<Repository>(Lifetime::Transient);
//!
//! let repo = container.get_as::<Repository>("Repository").unwrap();
//! assert_eq!(repo.timeout, 30);
//!
//! // The shared Logger inside is the same instance `get` returns.
//! let logger = container.get_as::<Logger>("Logger").unwrap();
//! assert!(Arc::ptr_eq(&repo.logger, &logger));
//! ```
//!
//! ## Overriding wiring
//!
//! Registered names take priority over automatic construction, and
//! re-registration invalidates cached instances; both together make
//! swapping a test double under a live graph a one-liner:
//!
//! ```rust
//! use wirebox::{Container, Lifetime, Producer, Resolver};
//!
//! let container = Container::new();
//! container.register_shared("gateway", |_| "live".to_string());
//! let first = container.get_as::<String>("gateway").unwrap();
//! assert_eq!(&*first, "live");
//!
//! container.register("gateway", Producer::instance("stub".to_string()), Lifetime::Shared);
//! let second = container.get_as::<String>("gateway").unwrap();
//! assert_eq!(&*second, "stub");
//! ```

// Module declarations
pub mod blueprint;
pub mod container;
pub mod error;
pub mod lifetime;
pub mod observer;
pub mod registration;
pub mod traits;
pub mod validation;

#[cfg(feature = "graph-export")]
pub mod graph;

// Internal modules
mod autowire;
mod cache;
mod internal;

// Re-export core types
pub use blueprint::{AnyArc, Args, Blueprint, BlueprintBuilder, Constructible, Param};
pub use container::{Container, ResolverContext};
pub use error::{WireError, WireResult};
pub use lifetime::Lifetime;
pub use observer::{ContainerObserver, LoggingObserver};
pub use registration::{FactoryFn, Producer, ServiceDefinition};
pub use traits::{Dispose, Resolve, Resolver};
pub use validation::{WiringIssue, WiringReport};

#[cfg(feature = "graph-export")]
pub use graph::{GraphEdge, GraphNode, ServiceGraph};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_shared_resolution() {
        let container = Container::new();
        container.register_instance("answer", 42usize);

        let a = container.get_as::<usize>("answer").unwrap();
        let b = container.get_as::<usize>("answer").unwrap();

        assert_eq!(*a, 42);
        assert!(Arc::ptr_eq(&a, &b)); // Same instance
    }

    #[test]
    fn test_transient_resolution() {
        let container = Container::new();
        let counter = Arc::new(Mutex::new(0));
        let counter_clone = counter.clone();

        container.register_transient("greeting", move |_| {
            let mut c = counter_clone.lock().unwrap();
            *c += 1;
            format!("instance-{}", *c)
        });

        let a = container.get_as::<String>("greeting").unwrap();
        let b = container.get_as::<String>("greeting").unwrap();

        assert_eq!(a.as_str(), "instance-1");
        assert_eq!(b.as_str(), "instance-2");
        assert!(!Arc::ptr_eq(&a, &b)); // Different instances
    }

    #[test]
    fn test_not_found() {
        let container = Container::new();
        assert!(matches!(
            container.get("missing"),
            Err(WireError::NotFound(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_factory_sees_container_state() {
        struct Config {
            retries: u32,
        }
        struct Client {
            retries: u32,
        }

        let container = Container::new();
        container.register_instance("config", Config { retries: 3 });
        container.register_shared("client", |ctx| Client {
            retries: ctx.get_required::<Config>("config").retries,
        });

        let client = container.get_as::<Client>("client").unwrap();
        assert_eq!(client.retries, 3);
    }
}
