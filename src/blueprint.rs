//! Constructor blueprints.
//!
//! Rust has no runtime reflection over constructor signatures, so wirebox
//! replaces the metadata reader of reflective containers with an explicit
//! registration table: each constructible type publishes a [`Blueprint`]
//! listing its constructor parameters and a construct closure that receives
//! the resolved argument list. The resolver is then a graph-walker over
//! these blueprints, explicit wiring checked at compile time instead of
//! automatic metadata inspection.

use std::any::{type_name, Any};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{WireError, WireResult};

/// Type-erased shared value, the currency of the container.
///
/// Every resolved service crosses the container boundary as an `AnyArc`;
/// typed access goes through downcasting helpers like
/// [`Container::get_as`](crate::Container::get_as) or [`Args::take`].
pub type AnyArc = Arc<dyn Any + Send + Sync>;

pub(crate) type ConstructFn = Arc<dyn Fn(Args) -> WireResult<AnyArc> + Send + Sync>;

/// A type that can publish its own constructor blueprint.
///
/// Implementing `Constructible` makes a type available for auto-wiring: the
/// container can build it on demand (when another constructor declares it as
/// a parameter) and callers can register it wholesale with
/// [`Container::register_type`](crate::Container::register_type).
///
/// # Examples
///
/// ```rust
/// use wirebox::{Blueprint, Constructible, Param};
/// use std::sync::Arc;
///
/// struct Logger;
///
/// impl Constructible for Logger {
///     fn service_name() -> &'static str {
///         "Logger"
///     }
///
///     fn blueprint() -> Blueprint {
///         Blueprint::for_type::<Logger>(Self::service_name())
///             .construct_with(|_| Ok(Logger))
///     }
/// }
///
/// struct Repository {
///     logger: Arc<Logger>,
///     timeout: u64,
/// }
///
/// impl Constructible for Repository {
///     fn service_name() -> &'static str {
///         "Repository"
///     }
///
///     fn blueprint() -> Blueprint {
///         Blueprint::for_type::<Repository>(Self::service_name())
///             .param(Param::service::<Logger>("logger"))
///             .param(Param::value::<u64>("timeout").with_default(30u64))
///             .construct_with(|mut args| {
///                 Ok(Repository {
///                     logger: args.take::<Logger>("logger")?,
///                     timeout: args.value::<u64>("timeout")?,
///                 })
///             })
///     }
/// }
/// ```
pub trait Constructible: Send + Sync + Sized + 'static {
    /// Service name this type wires under when auto-constructed.
    fn service_name() -> &'static str;

    /// The type's constructor blueprint.
    ///
    /// Exactly one designated constructor per type; overload sets are not
    /// supported.
    fn blueprint() -> Blueprint;
}

/// Constructor metadata for one constructible type.
///
/// A blueprint carries the service name, the parameter list in declaration
/// order, and the construct closure. Blueprints are cheap to clone (the
/// closure is shared) and are consumed by the resolver when a
/// [`Producer::Type`](crate::Producer::Type) registration or a declared
/// constructor parameter needs an instance.
#[derive(Clone)]
pub struct Blueprint {
    service: &'static str,
    params: Vec<Param>,
    construct: ConstructFn,
}

impl Blueprint {
    /// Starts a blueprint for `T`, wired under `service`.
    pub fn for_type<T: Send + Sync + 'static>(service: &'static str) -> BlueprintBuilder<T> {
        BlueprintBuilder {
            service,
            params: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// The service name this blueprint constructs.
    pub fn service(&self) -> &'static str {
        self.service
    }

    /// Constructor parameters in declaration order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub(crate) fn invoke(&self, args: Args) -> WireResult<AnyArc> {
        (self.construct)(args)
    }
}

impl fmt::Debug for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blueprint")
            .field("service", &self.service)
            .field("params", &self.params)
            .finish()
    }
}

/// Builder for [`Blueprint`], finished by [`construct_with`](Self::construct_with).
pub struct BlueprintBuilder<T> {
    service: &'static str,
    params: Vec<Param>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> BlueprintBuilder<T> {
    /// Appends one constructor parameter. Order of calls is declaration order.
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Finishes the blueprint with the construct closure.
    ///
    /// The closure receives the resolved arguments and returns the built
    /// value; failures surface unchanged through resolution.
    pub fn construct_with<F>(self, construct: F) -> Blueprint
    where
        F: Fn(Args) -> WireResult<T> + Send + Sync + 'static,
    {
        Blueprint {
            service: self.service,
            params: self.params,
            construct: Arc::new(move |args| {
                construct(args).map(|value| Arc::new(value) as AnyArc)
            }),
        }
    }
}

/// What a constructor parameter declares about its type.
#[derive(Clone)]
pub(crate) enum Declared {
    /// A constructible/object type: resolvable by registered service name
    /// and, when a blueprint is known, constructible ad hoc.
    Service {
        service: &'static str,
        make: Option<fn() -> Blueprint>,
    },
    /// A plain value type. Auto-wiring never constructs these; they resolve
    /// by registered parameter name, declared default, or optional fallback.
    Value(&'static str),
    /// No declared type at all.
    None,
}

/// One constructor parameter: name, declared type, default, optional flag.
///
/// Produced once when the blueprint is built; the resolver reads these
/// transiently during each construction.
#[derive(Clone)]
pub struct Param {
    name: &'static str,
    declared: Declared,
    default: Option<AnyArc>,
    optional: bool,
}

impl Param {
    /// A parameter whose declared type is a [`Constructible`] service.
    ///
    /// Resolution prefers a registration under `T::service_name()` (so
    /// explicit registrations override automatic wiring, e.g. swapping in a
    /// test double), and falls back to constructing `T` from its own
    /// blueprint.
    pub fn service<T: Constructible>(name: &'static str) -> Param {
        Param {
            name,
            declared: Declared::Service {
                service: T::service_name(),
                make: Some(T::blueprint),
            },
            default: None,
            optional: false,
        }
    }

    /// A parameter depending on a registered service by name only.
    ///
    /// No blueprint is attached, so the name must be registered for the
    /// parameter to resolve (absent a default or optional marker).
    pub fn named(name: &'static str, service: &'static str) -> Param {
        Param {
            name,
            declared: Declared::Service {
                service,
                make: None,
            },
            default: None,
            optional: false,
        }
    }

    /// A plain value parameter (string, number, boolean, config struct...).
    ///
    /// Looked up in the store under the *parameter* name; auto-wiring never
    /// constructs value types, so without a registration, default, or
    /// optional marker the parameter is unresolvable.
    pub fn value<T: Send + Sync + 'static>(name: &'static str) -> Param {
        Param {
            name,
            declared: Declared::Value(type_name::<T>()),
            default: None,
            optional: false,
        }
    }

    /// A parameter with no declared type. Resolves like [`Param::value`]
    /// minus the type-name diagnostics.
    pub fn untyped(name: &'static str) -> Param {
        Param {
            name,
            declared: Declared::None,
            default: None,
            optional: false,
        }
    }

    /// Attaches a default used when nothing else satisfies the parameter.
    pub fn with_default<T: Send + Sync + 'static>(mut self, value: T) -> Param {
        self.default = Some(Arc::new(value));
        self
    }

    /// Marks the parameter optional: unresolvable becomes absent instead of
    /// an error. The construct closure observes absence via
    /// [`Args::take_opt`].
    pub fn optional(mut self) -> Param {
        self.optional = true;
        self
    }

    /// Parameter name as declared by the constructor.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the parameter may be left unsatisfied.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Whether a default value is attached.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// The declared service dependency, if the parameter names one.
    pub fn service_dependency(&self) -> Option<&'static str> {
        match self.declared {
            Declared::Service { service, .. } => Some(service),
            _ => None,
        }
    }

    pub(crate) fn declared(&self) -> &Declared {
        &self.declared
    }

    pub(crate) fn default_value(&self) -> Option<&AnyArc> {
        self.default.as_ref()
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let declared = match &self.declared {
            Declared::Service { service, make } => {
                if make.is_some() {
                    format!("service {} (constructible)", service)
                } else {
                    format!("service {}", service)
                }
            }
            Declared::Value(ty) => format!("value {}", ty),
            Declared::None => "untyped".to_string(),
        };
        f.debug_struct("Param")
            .field("name", &self.name)
            .field("declared", &declared)
            .field("has_default", &self.default.is_some())
            .field("optional", &self.optional)
            .finish()
    }
}

/// Resolved constructor arguments, handed to the construct closure in
/// declaration order.
///
/// Arguments are taken by name; a required argument that is missing (or
/// taken twice) surfaces as [`WireError::Unresolvable`], a wrongly-typed
/// take as [`WireError::TypeMismatch`].
pub struct Args {
    service: &'static str,
    values: Vec<(&'static str, Option<AnyArc>)>,
}

impl Args {
    pub(crate) fn new(service: &'static str, capacity: usize) -> Args {
        Args {
            service,
            values: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, name: &'static str, value: Option<AnyArc>) {
        self.values.push((name, value));
    }

    /// Takes a required service argument.
    pub fn take<T: Send + Sync + 'static>(&mut self, name: &str) -> WireResult<Arc<T>> {
        match self.take_opt::<T>(name)? {
            Some(value) => Ok(value),
            None => Err(self.unresolvable(name)),
        }
    }

    /// Takes an optional argument; `None` means the parameter was optional
    /// and nothing satisfied it.
    pub fn take_opt<T: Send + Sync + 'static>(&mut self, name: &str) -> WireResult<Option<Arc<T>>> {
        let index = self
            .values
            .iter()
            .position(|(slot_name, _)| *slot_name == name);
        let index = match index {
            Some(index) => index,
            None => return Err(self.unresolvable(name)),
        };
        match self.values[index].1.take() {
            Some(any) => any
                .downcast::<T>()
                .map(Some)
                .map_err(|_| WireError::TypeMismatch {
                    service: self.service.to_string(),
                    expected: type_name::<T>(),
                }),
            None => Ok(None),
        }
    }

    /// Takes a required plain value, cloned out of its shared wrapper.
    pub fn value<T: Clone + Send + Sync + 'static>(&mut self, name: &str) -> WireResult<T> {
        self.take::<T>(name).map(|arc| (*arc).clone())
    }

    /// Optional counterpart of [`value`](Self::value).
    pub fn value_opt<T: Clone + Send + Sync + 'static>(
        &mut self,
        name: &str,
    ) -> WireResult<Option<T>> {
        Ok(self.take_opt::<T>(name)?.map(|arc| (*arc).clone()))
    }

    fn unresolvable(&self, parameter: &str) -> WireError {
        WireError::Unresolvable {
            service: self.service.to_string(),
            parameter: parameter.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_take_by_name_and_type() {
        let mut args = Args::new("svc", 2);
        args.push("flag", Some(Arc::new(true)));
        args.push("missing", None);

        let flag = args.take::<bool>("flag").unwrap();
        assert!(*flag);

        // Optional slot left unsatisfied reads back as absent.
        assert!(args.take_opt::<u32>("missing").unwrap().is_none());

        // Unknown names are an authoring error, reported as unresolvable.
        assert!(matches!(
            args.take::<bool>("nope"),
            Err(WireError::Unresolvable { .. })
        ));
    }

    #[test]
    fn args_downcast_mismatch() {
        let mut args = Args::new("svc", 1);
        args.push("n", Some(Arc::new(7u64)));
        assert!(matches!(
            args.take::<String>("n"),
            Err(WireError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn value_clones_out_of_the_arc() {
        let mut args = Args::new("svc", 1);
        args.push("timeout", Some(Arc::new(30u64)));
        assert_eq!(args.value::<u64>("timeout").unwrap(), 30);
    }
}
