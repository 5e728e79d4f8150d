//! Circular dependency detection: factory chains, blueprint chains, and
//! stack hygiene after failures.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use wirebox::{
    Blueprint, Constructible, Container, Lifetime, Param, Resolver, WireError,
};

/// Helper: assert that resolving `name` reports a cycle with `expected_path`.
fn assert_cycle(container: &Container, name: &str, expected_path: &[&str]) {
    match container.get(name) {
        Err(WireError::Circular(path)) => {
            assert_eq!(path, expected_path, "wrong circular path");
        }
        Err(other) => panic!("expected Circular, got {}", other),
        Ok(_) => panic!("expected Circular, resolution succeeded"),
    }
}

#[test]
fn test_self_circular_factory() {
    let container = Container::new();
    container.try_register_transient("echo", |ctx| {
        ctx.get("echo")?; // Self-reference
        Ok("echo".to_string())
    });

    assert_cycle(&container, "echo", &["echo", "echo"]);
}

#[test]
fn test_two_level_circular_factories() {
    struct A;
    struct B;

    let container = Container::new();
    container.try_register_shared("a", |ctx| {
        ctx.get("b")?;
        Ok(A)
    });
    container.try_register_shared("b", |ctx| {
        ctx.get("a")?;
        Ok(B)
    });

    assert_cycle(&container, "a", &["a", "b", "a"]);
    assert_cycle(&container, "b", &["b", "a", "b"]);
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
fn test_two_level_circular_blueprints() {
    let container = Container::new();
    container.register_type::<Chicken>(Lifetime::Shared);
    container.register_type::<Egg>(Lifetime::Shared);

    assert_cycle(&container, "Chicken", &["Chicken", "Egg", "Chicken"]);
    assert_cycle(&container, "Egg", &["Egg", "Chicken", "Egg"]);
}

#[test]
fn test_circular_through_unregistered_blueprint() {
    let container = Container::new();
    // Only Chicken is registered; Egg is reached ad hoc and still closes
    // the loop back to the registered name.
    container.register_type::<Chicken>(Lifetime::Shared);

    assert_cycle(&container, "Chicken", &["Chicken", "Egg", "Chicken"]);
}

#[test]
fn test_three_level_circular() {
    struct X;
    struct Y;
    struct Z;

    let container = Container::new();
    container.try_register_shared("x", |ctx| {
        ctx.get("y")?;
        Ok(X)
    });
    container.try_register_shared("y", |ctx| {
        ctx.get("z")?;
        Ok(Y)
    });
    container.try_register_shared("z", |ctx| {
        ctx.get("x")?;
        Ok(Z)
    });

    assert_cycle(&container, "x", &["x", "y", "z", "x"]);
}

#[test]
fn test_stack_unwinds_after_circular_failure() {
    let container = Container::new();
    container.register_type::<Chicken>(Lifetime::Shared);
    container.register_type::<Egg>(Lifetime::Shared);
    container.register_instance("answer", 42usize);

    assert!(matches!(
        container.get("Chicken"),
        Err(WireError::Circular(_))
    ));

    // The failed build released every stack frame: unrelated and even the
    // same resolutions behave identically afterwards.
    assert_eq!(*container.get_required::<usize>("answer"), 42);
    assert_cycle(&container, "Chicken", &["Chicken", "Egg", "Chicken"]);
}

#[test]
fn test_stack_unwinds_after_panicking_factory() {
    let container = Container::new();
    container.register_transient("bomb", |_| -> String { panic!("factory exploded") });
    container.register_instance("answer", 42usize);

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = container.get("bomb");
    }));
    assert!(result.is_err());

    // Panic unwound through the resolution stack without leaving "bomb"
    // marked mid-construction.
    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = container.get("bomb");
    }));
    assert!(result.is_err());
    assert_eq!(*container.get_required::<usize>("answer"), 42);
}

#[test]
fn test_acyclic_diamond_is_not_reported_as_cycle() {
    // left and right both depend on base; that's sharing, not a cycle.
    struct Base;
    struct Left;
    struct Right;
    struct Top;

    let container = Container::new();
    container.register_shared("base", |_| Base);
    container.register_shared("left", |ctx| {
        let _ = ctx.get_required::<Base>("base");
        Left
    });
    container.register_shared("right", |ctx| {
        let _ = ctx.get_required::<Base>("base");
        Right
    });
    container.register_shared("top", |ctx| {
        let _ = ctx.get_required::<Left>("left");
        let _ = ctx.get_required::<Right>("right");
        Top
    });

    assert!(container.get("top").is_ok());
}
