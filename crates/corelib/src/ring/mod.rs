//! Consistent hash ring implementation.
//!
//! The ring manages token positions, the bounded-load partition table built
//! from them, and replica selection for keys.

mod closest;
mod distribute;
pub mod ring;
pub mod shared;
pub mod sorted_set;

pub use ring::HashRing;
pub use shared::SharedRing;
pub use sorted_set::OrderedUintSet;
