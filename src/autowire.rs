//! The dependency resolver: builds blueprints by satisfying constructor
//! parameters.
//!
//! For each parameter, in declaration order: a registered name wins (so
//! explicit registrations override automatic wiring), an unregistered but
//! constructible declared type is built ad hoc, then the declared default,
//! then the optional fallback, else the build fails naming the parameter
//! and the service being built. Ad-hoc builds are never cached; the store
//! stays the single source of truth for top-level services.

use crate::blueprint::{AnyArc, Args, Blueprint, Declared, Param};
use crate::container::Container;
use crate::error::{WireError, WireResult};
use crate::internal::Frame;

/// Builds `blueprint` against `container`.
///
/// The caller holds the resolution-stack frame covering this build (the
/// container enters one per named resolution; the ad-hoc path below enters
/// its own).
pub(crate) fn construct(blueprint: &Blueprint, container: &Container) -> WireResult<AnyArc> {
    let params = blueprint.params();
    let mut args = Args::new(blueprint.service(), params.len());
    for param in params {
        let value = resolve_param(blueprint, param, container)?;
        args.push(param.name(), value);
    }
    blueprint.invoke(args)
}

/// Ad-hoc build of an unregistered constructible type, as a constructor
/// parameter of some other service. Enters its own stack frame so cycles
/// running through unregistered types are still caught by name.
fn construct_ad_hoc(blueprint: &Blueprint, container: &Container) -> WireResult<AnyArc> {
    let _frame = Frame::enter(blueprint.service())?;
    construct(blueprint, container)
}

/// Satisfies one constructor parameter. `Ok(None)` means the parameter was
/// optional and nothing satisfied it.
fn resolve_param(
    owner: &Blueprint,
    param: &Param,
    container: &Container,
) -> WireResult<Option<AnyArc>> {
    match param.declared() {
        Declared::Service { service, make } => {
            if container.contains(service) {
                return container.resolve_named(service).map(Some);
            }
            if let Some(make) = make {
                let nested = make();
                return construct_ad_hoc(&nested, container).map(Some);
            }
            // Declared but neither registered nor constructible: fall
            // through to default/optional.
        }
        // Value and untyped parameters are never auto-constructed; they
        // resolve by registered parameter name only.
        Declared::Value(_) | Declared::None => {
            if container.contains(param.name()) {
                return container.resolve_named(param.name()).map(Some);
            }
        }
    }

    if let Some(default) = param.default_value() {
        return Ok(Some(default.clone()));
    }
    if param.is_optional() {
        return Ok(None);
    }
    Err(WireError::Unresolvable {
        service: owner.service().to_string(),
        parameter: param.name().to_string(),
    })
}
