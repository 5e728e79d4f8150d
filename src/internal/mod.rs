//! Internal implementation details.

pub(crate) mod dispose_bag;
pub(crate) mod stack;
pub(crate) mod sync;

pub(crate) use dispose_bag::DisposeBag;
pub(crate) use stack::Frame;

/// Hash map used for the definition store and instance cache.
#[cfg(feature = "ahash")]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;
#[cfg(not(feature = "ahash"))]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V>;
