//! Ring configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest accepted `partition_count`; the partition table is held in memory.
pub const MAX_PARTITION_COUNT: u64 = u32::MAX as u64;

/// Immutable parameters of a [`HashRing`](crate::HashRing).
///
/// The values are fixed for the lifetime of the ring; changing
/// `partition_count` in particular would remap every key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of logical partitions keys hash into.
    pub partition_count: u64,
    /// Virtual tokens placed on the ring per physical node.
    pub replication_factor: usize,
    /// Slack multiplier above a perfectly even load. Must be >= 1.0.
    pub load_factor: f64,
}

impl Config {
    pub fn new(partition_count: u64, replication_factor: usize, load_factor: f64) -> Self {
        Self {
            partition_count,
            replication_factor,
            load_factor,
        }
    }

    /// Checks the invariants every ring relies on.
    pub fn validate(&self) -> Result<()> {
        if self.partition_count == 0 {
            return Err(Error::InvalidConfig(
                "partition_count must be positive".into(),
            ));
        }
        if self.partition_count > MAX_PARTITION_COUNT {
            return Err(Error::InvalidConfig(format!(
                "partition_count must be at most {MAX_PARTITION_COUNT}, got {}",
                self.partition_count
            )));
        }
        if self.replication_factor == 0 {
            return Err(Error::InvalidConfig(
                "replication_factor must be positive".into(),
            ));
        }
        if !self.load_factor.is_finite() || self.load_factor < 1.0 {
            return Err(Error::InvalidConfig(format!(
                "load_factor must be a finite value >= 1.0, got {}",
                self.load_factor
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(271, 20, 1.25)
    }
}
