//! Hash set used for section bookkeeping.
//!
//! Section indices are small dense integers, so the Fx hasher is used unless
//! the `std-hash` feature asks for the standard SipHash set.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::HashSet;
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::FxHashSet as HashSet;
}
