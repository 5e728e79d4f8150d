//! Property-based tests for resolution behavior.
//!
//! These verify that lifetime and override semantics hold regardless of the
//! specific names, values, or registration orders used.

use proptest::prelude::*;
use std::sync::Arc;
use wirebox::{
    Args, Blueprint, Constructible, Container, Lifetime, Param, Producer, Resolver, WireResult,
};

#[derive(Debug, Clone)]
struct Payload {
    value: String,
}

proptest! {
    #[test]
    fn shared_resolution_is_identity_stable(name in "[a-z][a-z0-9_]{0,20}", value in "\\PC{0,50}") {
        let container = Container::new();
        container.register_instance(name.clone(), Payload { value: value.clone() });

        let resolved1 = container.get_required::<Payload>(&name);
        let resolved2 = container.get_required::<Payload>(&name);
        let resolved3 = container.get_required::<Payload>(&name);

        prop_assert!(Arc::ptr_eq(&resolved1, &resolved2));
        prop_assert!(Arc::ptr_eq(&resolved2, &resolved3));
        prop_assert_eq!(&resolved1.value, &value);
    }
}

proptest! {
    #[test]
    fn transient_resolution_is_always_fresh(gets in 1usize..20) {
        let container = Container::new();
        container.register_transient("payload", |_| Payload { value: "fresh".to_string() });

        let mut previous: Option<Arc<Payload>> = None;
        for _ in 0..gets {
            let current = container.get_required::<Payload>("payload");
            if let Some(previous) = &previous {
                prop_assert!(!Arc::ptr_eq(previous, &current));
            }
            previous = Some(current);
        }
    }
}

proptest! {
    #[test]
    fn resolution_matches_registration_state(register in any::<bool>()) {
        let container = Container::new();
        if register {
            container.register_instance("payload", Payload { value: "present".to_string() });
        }

        let result = container.get_as::<Payload>("payload");
        prop_assert_eq!(result.is_ok(), register);
    }
}

proptest! {
    #[test]
    fn last_registration_wins(values in proptest::collection::vec("\\PC{0,20}", 1..8)) {
        let container = Container::new();
        for value in &values {
            container.register_instance("payload", Payload { value: value.clone() });
            // Resolving between registrations must not pin an old producer.
            let _ = container.get_required::<Payload>("payload");
        }

        let resolved = container.get_required::<Payload>("payload");
        prop_assert_eq!(&resolved.value, values.last().unwrap());
    }
}

struct TimedService {
    timeout: u64,
}

impl Constructible for TimedService {
    fn service_name() -> &'static str {
        "TimedService"
    }

    fn blueprint() -> Blueprint {
        Blueprint::for_type::<TimedService>(Self::service_name())
            .param(Param::value::<u64>("timeout").with_default(30u64))
            .construct_with(|mut args: Args| -> WireResult<TimedService> {
                Ok(TimedService {
                    timeout: args.value::<u64>("timeout")?,
                })
            })
    }
}

proptest! {
    #[test]
    fn registered_value_always_beats_default(registered in proptest::option::of(any::<u64>())) {
        let container = Container::new();
        container.register_type::<TimedService>(Lifetime::Transient);
        if let Some(timeout) = registered {
            container.register("timeout", Producer::instance(timeout), Lifetime::Shared);
        }

        let service = container.get_required::<TimedService>("TimedService");
        prop_assert_eq!(service.timeout, registered.unwrap_or(30));
    }
}

proptest! {
    #[test]
    fn lifetime_policy_decides_identity(shared in any::<bool>()) {
        let container = Container::new();
        let lifetime = if shared { Lifetime::Shared } else { Lifetime::Transient };
        container.register(
            "payload",
            Producer::factory(|_| Payload { value: "x".to_string() }),
            lifetime,
        );

        let a = container.get_required::<Payload>("payload");
        let b = container.get_required::<Payload>("payload");
        prop_assert_eq!(Arc::ptr_eq(&a, &b), shared);
    }
}
