//! Map types shared across the workspace.
//!
//! Defaults to `hashbrown` with `ahash`; the `std-hash` feature switches back
//! to the standard library maps. Construct with `Default::default()` so both
//! configurations compile.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::{HashMap, HashSet};
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub type HashMap<K, V> = hashbrown::HashMap<K, V, ahash::RandomState>;
    pub type HashSet<K> = hashbrown::HashSet<K, ahash::RandomState>;
}
