//! Core library for bounded-load consistent hashing.
//!
//! This crate provides:
//! - A pluggable 64-bit hasher abstraction
//! - Node identity and ring configuration
//! - The hash ring with bounded-load partition assignment
//! - Closest-N replica selection
//! - A lock-protected ring for concurrent readers

pub mod config;
pub mod error;
pub mod hasher;
pub mod node;
pub mod ring;

pub use config::Config;
pub use error::{Error, Result};
pub use hasher::Hasher;
pub use node::{Node, RingNode};
pub use ring::{HashRing, OrderedUintSet, SharedRing};
