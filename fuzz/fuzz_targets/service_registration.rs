#![no_main]

use libfuzzer_sys::fuzz_target;
use wirebox::{Container, Lifetime, Producer, Resolver};

// Random register/overwrite/get interleavings must never panic and must
// always leave the last registration in effect.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let container = Container::new();
    let mut last_value: Option<u8> = None;

    for chunk in data.chunks(2) {
        let op = chunk[0] % 4;
        let value = *chunk.get(1).unwrap_or(&0);

        match op {
            0 => {
                container.register("svc", Producer::instance(value), Lifetime::Shared);
                last_value = Some(value);
            }
            1 => {
                container.register("svc", Producer::instance(value), Lifetime::Transient);
                last_value = Some(value);
            }
            2 => {
                if let Some(expected) = last_value {
                    let resolved = container.get_required::<u8>("svc");
                    assert_eq!(*resolved, expected);
                } else {
                    assert!(container.get("svc").is_err());
                }
            }
            _ => {
                container.teardown();
            }
        }
    }
});
