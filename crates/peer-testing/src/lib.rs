//! Testing utilities for native-peer: a native module that records every
//! call it receives.

pub mod testing;

// Re-export testing utilities
pub use testing::*;

pub mod prelude {
    pub use crate::testing::*;
}
