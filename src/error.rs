//! Error types for the service container.

use std::fmt;
use std::sync::Arc;

/// Container errors
///
/// Represents the error conditions that can occur while registering or
/// resolving services in wirebox. All failures are deterministic given the
/// current registrations; nothing is retried, and a failed build never
/// leaves a half-built instance in the shared cache.
///
/// # Examples
///
/// ```rust
/// use wirebox::{Container, WireError};
///
/// let container = Container::new();
/// match container.get("mailer") {
///     Err(WireError::NotFound(name)) => assert_eq!(name, "mailer"),
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use wirebox::WireError;
///
/// let circular = WireError::Circular(vec![
///     "orders".to_string(),
///     "billing".to_string(),
///     "orders".to_string(),
/// ]);
/// assert_eq!(
///     circular.to_string(),
///     "Circular dependency: orders -> billing -> orders"
/// );
/// ```
#[derive(Debug, Clone)]
pub enum WireError {
    /// No service registered under this name
    NotFound(String),
    /// A required constructor parameter could not be satisfied
    Unresolvable {
        /// Service being built
        service: String,
        /// Parameter that could not be satisfied
        parameter: String,
    },
    /// Circular dependency detected (includes the full path)
    Circular(Vec<String>),
    /// Typed view over a service whose instance is a different type
    TypeMismatch {
        /// Service name that was resolved
        service: String,
        /// Type the caller asked for
        expected: &'static str,
    },
    /// A fallible factory or constructor reported its own error
    ///
    /// The source is carried as-is and exposed through
    /// [`std::error::Error::source`]; the container never wraps it further.
    Construction(Arc<dyn std::error::Error + Send + Sync>),
    /// Maximum resolution depth exceeded
    DepthExceeded(usize),
}

impl WireError {
    /// Wraps a factory's own failure for propagation out of resolution.
    pub fn construction<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        WireError::Construction(Arc::new(source))
    }
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::NotFound(name) => write!(f, "Service not found: {}", name),
            WireError::Unresolvable { service, parameter } => {
                write!(
                    f,
                    "Cannot resolve parameter `{}` of service `{}`",
                    parameter, service
                )
            }
            WireError::Circular(path) => {
                write!(f, "Circular dependency: {}", path.join(" -> "))
            }
            WireError::TypeMismatch { service, expected } => {
                write!(f, "Type mismatch for `{}`: expected {}", service, expected)
            }
            WireError::Construction(source) => write!(f, "Construction failed: {}", source),
            WireError::DepthExceeded(depth) => write!(f, "Max depth {} exceeded", depth),
        }
    }
}

impl std::error::Error for WireError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WireError::Construction(source) => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Result type for container operations
///
/// A convenience alias for `Result<T, WireError>` used throughout wirebox,
/// following the common Rust pattern of a crate-specific Result type to
/// reduce boilerplate in signatures.
pub type WireResult<T> = Result<T, WireError>;
