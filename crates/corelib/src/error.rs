//! Error types for the core library.

use thiserror::Error;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Lookup attempted on a ring with no members.
    #[error("ring has no members")]
    EmptyRing,
    /// A partition could not be placed without exceeding the load cap.
    #[error("not enough capacity to place partition {partition_id} (average load {average_load})")]
    NotEnoughCapacity { partition_id: u64, average_load: f64 },
    /// Closest-N asked for more nodes than the ring has.
    #[error("not enough members for closest {requested}: ring has {members}")]
    InsufficientMembers { requested: usize, members: usize },
    /// A partition id has no recorded owner.
    #[error("partition {0} has no owner")]
    KeyNotMapped(u64),
    /// Invalid ring configuration
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
