//! Static wiring verification via `Container::verify`.

use std::sync::Arc;
use wirebox::{
    Blueprint, Constructible, Container, Lifetime, Param, WiringIssue,
};

struct Logger;

impl Constructible for Logger {
    fn service_name() -> &'static str {
        "Logger"
    }

    fn blueprint() -> Blueprint {
        Blueprint::for_type::<Logger>(Self::service_name()).construct_with(|_| Ok(Logger))
    }
}

struct Mailer {
    #[allow(dead_code)]
    transport: Arc<String>,
}

impl Constructible for Mailer {
    fn service_name() -> &'static str {
        "Mailer"
    }

    fn blueprint() -> Blueprint {
        Blueprint::for_type::<Mailer>(Self::service_name())
            .param(Param::named("transport", "Transport"))
            .construct_with(|mut args| {
                Ok(Mailer {
                    transport: args.take::<String>("transport")?,
                })
            })
    }
}

#[test]
fn complete_wiring_verifies_clean() {
    let container = Container::new();
    container.register_type::<Logger>(Lifetime::Shared);
    container.register_type::<Mailer>(Lifetime::Shared);
    container.register_instance("Transport", "smtp://localhost".to_string());

    let report = container.verify();
    assert!(report.is_ok(), "unexpected issues: {:?}", report.issues());
}

#[test]
fn missing_named_dependency_is_reported() {
    let container = Container::new();
    container.register_type::<Mailer>(Lifetime::Shared);

    let report = container.verify();
    assert_eq!(report.issues().len(), 1);
    match &report.issues()[0] {
        WiringIssue::MissingDependency {
            service,
            parameter,
            wanted,
        } => {
            assert_eq!(service, "Mailer");
            assert_eq!(parameter, "transport");
            assert_eq!(wanted, "Transport");
        }
        other => panic!("expected MissingDependency, got {}", other),
    }
}

#[test]
fn missing_value_is_reported() {
    struct Api {
        #[allow(dead_code)]
        key: String,
    }

    impl Constructible for Api {
        fn service_name() -> &'static str {
            "Api"
        }

        fn blueprint() -> Blueprint {
            Blueprint::for_type::<Api>(Self::service_name())
                .param(Param::value::<String>("key"))
                .construct_with(|mut args| {
                    Ok(Api {
                        key: args.value::<String>("key")?,
                    })
                })
        }
    }

    let container = Container::new();
    container.register_type::<Api>(Lifetime::Shared);

    let report = container.verify();
    assert!(matches!(
        report.issues(),
        [WiringIssue::MissingValue { service, parameter }]
            if service == "Api" && parameter == "key"
    ));

    // A registration under the parameter name satisfies the verifier the
    // same way it satisfies the resolver.
    container.register_instance("key", "s3cr3t".to_string());
    assert!(container.verify().is_ok());
}

#[test]
fn optional_and_defaulted_parameters_are_not_issues() {
    struct Tunable;

    impl Constructible for Tunable {
        fn service_name() -> &'static str {
            "Tunable"
        }

        fn blueprint() -> Blueprint {
            Blueprint::for_type::<Tunable>(Self::service_name())
                .param(Param::value::<u64>("retries").with_default(3u64))
                .param(Param::value::<String>("tag").optional())
                .construct_with(|_| Ok(Tunable))
        }
    }

    let container = Container::new();
    container.register_type::<Tunable>(Lifetime::Shared);
    assert!(container.verify().is_ok());
}

struct Chicken {
    #[allow(dead_code)]
    egg: Arc<Egg>,
}
struct Egg {
    #[allow(dead_code)]
    chicken: Arc<Chicken>,
}

impl Constructible for Chicken {
    fn service_name() -> &'static str {
        "Chicken"
    }

    fn blueprint() -> Blueprint {
        Blueprint::for_type::<Chicken>(Self::service_name())
            .param(Param::service::<Egg>("egg"))
            .construct_with(|mut args| {
                Ok(Chicken {
                    egg: args.take::<Egg>("egg")?,
                })
            })
    }
}

impl Constructible for Egg {
    fn service_name() -> &'static str {
        "Egg"
    }

    fn blueprint() -> Blueprint {
        Blueprint::for_type::<Egg>(Self::service_name())
            .param(Param::service::<Chicken>("chicken"))
            .construct_with(|mut args| {
                Ok(Egg {
                    chicken: args.take::<Chicken>("chicken")?,
                })
            })
    }
}

#[test]
fn declared_cycles_are_reported_once() {
    let container = Container::new();
    container.register_type::<Chicken>(Lifetime::Shared);
    container.register_type::<Egg>(Lifetime::Shared);

    let report = container.verify();
    let cycles: Vec<_> = report
        .issues()
        .iter()
        .filter(|issue| matches!(issue, WiringIssue::Cycle { .. }))
        .collect();
    assert_eq!(cycles.len(), 1);
    match cycles[0] {
        WiringIssue::Cycle { path } => {
            assert_eq!(path.first(), path.last());
            assert!(path.iter().any(|n| n == "Chicken"));
            assert!(path.iter().any(|n| n == "Egg"));
        }
        _ => unreachable!(),
    }
}

#[test]
fn cycle_through_ad_hoc_blueprint_is_reported() {
    let container = Container::new();
    // Egg is reachable only through Chicken's blueprint.
    container.register_type::<Chicken>(Lifetime::Shared);

    let report = container.verify();
    assert!(report
        .issues()
        .iter()
        .any(|issue| matches!(issue, WiringIssue::Cycle { .. })));
}

#[test]
fn factories_are_opaque_to_verification() {
    let container = Container::new();
    // This factory would fail at build time, but verify cannot see into it.
    container.try_register_shared::<String, _>("blind", |ctx| {
        ctx.get("nowhere")?;
        Ok("never".to_string())
    });

    assert!(container.verify().is_ok());
}
