#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::Arc;
use wirebox::{Container, Resolver, WireError};

// Lifetime invariants must hold for arbitrary registration patterns, and
// unresolvable graphs must fail with an error instead of looping.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let container = Container::new();
    let shared = data[0] % 2 == 0;
    let with_cycle = data[1] % 2 == 0;

    if shared {
        container.register_shared("leaf", |_| 42u64);
    } else {
        container.register_transient("leaf", |_| 42u64);
    }

    if with_cycle {
        container.try_register_shared("root", |ctx| {
            ctx.get("root")?;
            Ok(0u64)
        });
        assert!(matches!(
            container.get("root"),
            Err(WireError::Circular(_))
        ));
    }

    let a = container.get_required::<u64>("leaf");
    let b = container.get_required::<u64>("leaf");
    assert_eq!(Arc::ptr_eq(&a, &b), shared);
    assert_eq!(*a, 42);
});
