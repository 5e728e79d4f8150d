//! Static wiring verification.
//!
//! [`Container::verify`] walks the registered blueprints without building
//! anything and reports wiring that can never resolve: required parameters
//! with no registration, no blueprint, and no default, and cycles in the
//! declared dependency graph. Factory registrations are opaque closures and
//! cannot be verified statically; they are skipped.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::blueprint::{Blueprint, Declared};
use crate::container::Container;
use crate::registration::{Producer, ServiceDefinition};

/// One problem found by [`Container::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WiringIssue {
    /// A constructor parameter declares a service that is neither registered
    /// nor constructible, and has no default or optional fallback.
    MissingDependency {
        /// Service whose blueprint declares the parameter
        service: String,
        /// The parameter name
        parameter: String,
        /// The service name the parameter asked for
        wanted: String,
    },
    /// A value/untyped parameter with no registration under its name and no
    /// default or optional fallback.
    MissingValue {
        /// Service whose blueprint declares the parameter
        service: String,
        /// The parameter name
        parameter: String,
    },
    /// A cycle in the declared constructor dependencies.
    Cycle {
        /// The cycle, first name repeated at the end
        path: Vec<String>,
    },
}

impl fmt::Display for WiringIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WiringIssue::MissingDependency {
                service,
                parameter,
                wanted,
            } => write!(
                f,
                "`{}` parameter `{}` wants `{}`, which is neither registered nor constructible",
                service, parameter, wanted
            ),
            WiringIssue::MissingValue { service, parameter } => write!(
                f,
                "`{}` parameter `{}` has no registration, default, or optional fallback",
                service, parameter
            ),
            WiringIssue::Cycle { path } => {
                write!(f, "declared dependency cycle: {}", path.join(" -> "))
            }
        }
    }
}

/// Outcome of [`Container::verify`].
#[derive(Debug, Default)]
pub struct WiringReport {
    issues: Vec<WiringIssue>,
}

impl WiringReport {
    /// True when no issues were found.
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    /// The issues, in discovery order.
    pub fn issues(&self) -> &[WiringIssue] {
        &self.issues
    }
}

impl Container {
    /// Statically verifies the declared wiring of every registered
    /// blueprint, including blueprints reachable only through ad-hoc
    /// construction.
    ///
    /// # Examples
    ///
    /// ```
    /// use wirebox::{Blueprint, Constructible, Container, Lifetime, Param};
    /// use std::sync::Arc;
    ///
    /// struct Mailer {
    ///     transport: Arc<String>,
    /// }
    ///
    /// impl Constructible for Mailer {
    ///     fn service_name() -> &'static str {
    ///         "Mailer"
    ///     }
    ///     fn blueprint() -> Blueprint {
    ///         Blueprint::for_type::<Mailer>(Self::service_name())
    ///             .param(Param::named("transport", "Transport"))
    ///             .construct_with(|mut args| {
    ///                 Ok(Mailer {
    ///                     transport: args.take::<String>("transport")?,
    ///                 })
    ///             })
    ///     }
    /// }
    ///
    /// let container = Container::new();
    /// container.register_type::<Mailer>(Lifetime::Shared);
    ///
    /// // "Transport" is not registered anywhere.
    /// let report = container.verify();
    /// assert!(!report.is_ok());
    /// ```
    pub fn verify(&self) -> WiringReport {
        let registered: HashMap<String, ServiceDefinition> =
            self.snapshot_definitions().into_iter().collect();

        let mut report = WiringReport::default();
        let mut checked = HashSet::new();
        for (_, definition) in registered.iter() {
            if let Producer::Type(blueprint) = definition.producer() {
                check_parameters(blueprint, &registered, &mut checked, &mut report.issues);
            }
        }

        let mut finder = CycleFinder {
            registered: &registered,
            path: Vec::new(),
            done: HashSet::new(),
            reported: HashSet::new(),
            issues: &mut report.issues,
        };
        let mut roots: Vec<&String> = registered.keys().collect();
        roots.sort();
        for root in roots {
            finder.visit(root.clone(), None);
        }

        report
    }
}

fn check_parameters(
    blueprint: &Blueprint,
    registered: &HashMap<String, ServiceDefinition>,
    checked: &mut HashSet<String>,
    issues: &mut Vec<WiringIssue>,
) {
    // Each blueprint is checked once; this also terminates recursion over
    // cyclic ad-hoc graphs, which the cycle pass reports separately.
    if !checked.insert(blueprint.service().to_string()) {
        return;
    }

    for param in blueprint.params() {
        match param.declared() {
            Declared::Service { service, make } => {
                if registered.contains_key(*service) {
                    continue;
                }
                if let Some(make) = make {
                    check_parameters(&make(), registered, checked, issues);
                    continue;
                }
                if param.has_default() || param.is_optional() {
                    continue;
                }
                issues.push(WiringIssue::MissingDependency {
                    service: blueprint.service().to_string(),
                    parameter: param.name().to_string(),
                    wanted: service.to_string(),
                });
            }
            Declared::Value(_) | Declared::None => {
                if registered.contains_key(param.name())
                    || param.has_default()
                    || param.is_optional()
                {
                    continue;
                }
                issues.push(WiringIssue::MissingValue {
                    service: blueprint.service().to_string(),
                    parameter: param.name().to_string(),
                });
            }
        }
    }
}

struct CycleFinder<'a> {
    registered: &'a HashMap<String, ServiceDefinition>,
    path: Vec<String>,
    done: HashSet<String>,
    reported: HashSet<String>,
    issues: &'a mut Vec<WiringIssue>,
}

impl CycleFinder<'_> {
    fn visit(&mut self, name: String, ad_hoc: Option<Blueprint>) {
        if self.done.contains(&name) {
            return;
        }
        if let Some(pos) = self.path.iter().position(|entry| *entry == name) {
            let mut cycle: Vec<String> = self.path[pos..].to_vec();
            cycle.push(name);
            // The same cycle is reachable from every node on it; report it
            // once, keyed by its member set.
            let mut members: Vec<&String> = cycle[..cycle.len() - 1].iter().collect();
            members.sort();
            let key = members
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(" -> ");
            if self.reported.insert(key) {
                self.issues.push(WiringIssue::Cycle { path: cycle });
            }
            return;
        }

        let blueprint = ad_hoc.or_else(|| {
            self.registered
                .get(&name)
                .and_then(|definition| match definition.producer() {
                    Producer::Type(blueprint) => Some(blueprint.clone()),
                    _ => None,
                })
        });
        let blueprint = match blueprint {
            Some(blueprint) => blueprint,
            // Instances and factories terminate traversal.
            None => {
                self.done.insert(name);
                return;
            }
        };

        self.path.push(name.clone());
        for param in blueprint.params() {
            if let Declared::Service { service, make } = param.declared() {
                if self.registered.contains_key(*service) {
                    self.visit(service.to_string(), None);
                } else if let Some(make) = make {
                    self.visit(service.to_string(), Some(make()));
                }
            }
        }
        self.path.pop();
        self.done.insert(name);
    }
}
